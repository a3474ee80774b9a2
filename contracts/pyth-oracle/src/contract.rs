use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response, StdResult,
};

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use cw2::set_contract_version;

use crate::{
    error::ContractError,
    events::InitializationEvent,
    governance::{
        GovernanceAction, GovernancePayload, SetDataSources, SetGovernanceDataSource,
        SetStalePriceThreshold,
    },
    msg::{
        DataSourcesResponse, ExecuteMsg, GovernanceInfoResponse, InstantiateMsg, MigrateMsg,
        QueryMsg, StalePriceThresholdResponse,
    },
    receipt::{verify, GovernanceReceipt},
    state::{
        get_stale_price_threshold_secs, governance_sequence, ConfigInfo, PriceFeed, CONFIG,
        GOVERNANCE_SEQUENCE, PRICE_FEEDS, STALE_PRICE_THRESHOLD,
    },
    wormhole::WormholeVerifier,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-pyth-oracle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // the initial configuration obeys the same rules as governance updates
    SetStalePriceThreshold {
        threshold: msg.stale_price_threshold_secs,
    }
    .validate()?;
    SetGovernanceDataSource {
        source: msg.governance_source.clone(),
        initial_sequence: msg.governance_sequence_number,
    }
    .validate()?;
    SetDataSources {
        data_sources: msg.data_sources.clone(),
    }
    .validate()?;

    let state = ConfigInfo {
        wormhole_contract: deps.api.addr_validate(&msg.wormhole_contract)?,
        chain_id: msg.chain_id,
        governance_source: msg.governance_source,
        data_sources: msg.data_sources,
    };
    CONFIG.save(deps.storage, &state)?;
    GOVERNANCE_SEQUENCE.save(deps.storage, &msg.governance_sequence_number)?;
    STALE_PRICE_THRESHOLD.save(deps.storage, &msg.stale_price_threshold_secs)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("version", CONTRACT_VERSION)
        .add_event(Event::from(InitializationEvent {})))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ExecuteGovernanceInstruction { data } => {
            handle_governance_vaa(deps, env, info, data.as_slice())
        }
    }
}

fn handle_governance_vaa(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    data: &[u8],
) -> Result<Response, ContractError> {
    let cfg = CONFIG.load(deps.storage)?;

    let receipt = {
        let verifier = WormholeVerifier::new(&deps.querier, cfg.wormhole_contract.as_str());
        verify(deps.storage, &cfg, &verifier, data, env.block.time.seconds())?
    };

    let emitter_chain = receipt.emitter_chain();
    let sequence = receipt.sequence();
    let response = execute_governance_instruction(deps, &env, receipt)?;

    Ok(response
        .add_attribute("sender", info.sender)
        .add_attribute("emitter_chain", emitter_chain.to_string())
        .add_attribute("sequence", sequence.to_string()))
}

/// Applies the instruction carried by `receipt`.
///
/// The payload is validated before anything is written; the receipt is then
/// consumed, which advances the governance sequence, and the matching action
/// updates state.
pub fn execute_governance_instruction(
    deps: DepsMut,
    env: &Env,
    receipt: GovernanceReceipt,
) -> Result<Response, ContractError> {
    receipt.instruction().action.validate()?;

    let (witness, instruction) = receipt.consume(deps.storage)?;

    match instruction.action {
        GovernanceAction::UpgradeContract(p) => p.apply(&witness, deps, env),
        GovernanceAction::SetGovernanceDataSource(p) => p.apply(&witness, deps, env),
        GovernanceAction::SetDataSources(p) => p.apply(&witness, deps, env),
        GovernanceAction::SetStalePriceThreshold(p) => p.apply(&witness, deps, env),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let bin = match msg {
        QueryMsg::StalePriceThreshold {} => to_json_binary(&query_stale_price_threshold(deps)?)?,
        QueryMsg::GovernanceInfo {} => to_json_binary(&query_governance_info(deps)?)?,
        QueryMsg::DataSources {} => to_json_binary(&query_data_sources(deps)?)?,
        QueryMsg::PriceFeed { id } => to_json_binary(&query_price_feed(deps, id.as_slice())?)?,
        QueryMsg::Price { id } => {
            to_json_binary(&query_price_no_older_than_threshold(deps, &env, id.as_slice())?)?
        }
    };
    Ok(bin)
}

pub fn query_stale_price_threshold(deps: Deps) -> StdResult<StalePriceThresholdResponse> {
    Ok(StalePriceThresholdResponse {
        threshold_secs: get_stale_price_threshold_secs(deps.storage)?,
    })
}

pub fn query_governance_info(deps: Deps) -> StdResult<GovernanceInfoResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    Ok(GovernanceInfoResponse {
        governance_source: cfg.governance_source,
        governance_sequence_number: governance_sequence(deps.storage)?,
        chain_id: cfg.chain_id,
    })
}

pub fn query_data_sources(deps: Deps) -> StdResult<DataSourcesResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    Ok(DataSourcesResponse {
        data_sources: cfg.data_sources,
    })
}

pub fn query_price_feed(deps: Deps, id: &[u8]) -> Result<PriceFeed, ContractError> {
    PRICE_FEEDS
        .may_load(deps.storage, id)?
        .ok_or(ContractError::PriceFeedNotFound)
}

pub fn query_price_no_older_than_threshold(
    deps: Deps,
    env: &Env,
    id: &[u8],
) -> Result<PriceFeed, ContractError> {
    let feed = query_price_feed(deps, id)?;
    let threshold_secs = get_stale_price_threshold_secs(deps.storage)?;

    let age = (env.block.time.seconds() as i64).saturating_sub(feed.publish_time);
    if age > 0 && age as u64 > threshold_secs {
        return Err(ContractError::StalePrice {
            publish_time: feed.publish_time,
            threshold_secs,
        });
    }

    Ok(feed)
}
