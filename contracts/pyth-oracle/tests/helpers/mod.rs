use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use pyth_oracle::{
    contract::{execute, instantiate, migrate, query},
    governance::{GovernanceAction, GovernanceInstruction, GovernanceModule},
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg, StalePriceThresholdResponse},
    state::PythDataSource,
    wormhole::{ParsedVAA, WormholeQueryMsg},
};
use sha3::{Digest, Keccak256};

pub const OWNER: &str = "owner";
pub const CHAIN_ID: u16 = 21;
pub const GOV_CHAIN: u16 = 1;
pub const GOV_ADDRESS: [u8; 32] = [0x63; 32];

// Stand-in for the Wormhole core contract. Accepts unsigned VAAs produced by
// `build_vaa`; a non-zero guardian set index is treated as expired.
fn wormhole_instantiate(_: DepsMut, _: Env, _: MessageInfo, _: Empty) -> StdResult<Response> {
    Ok(Response::new())
}

fn wormhole_execute(_: DepsMut, _: Env, _: MessageInfo, _: Empty) -> StdResult<Response> {
    Err(StdError::generic_err("unsupported"))
}

fn wormhole_query(_: Deps, _: Env, msg: WormholeQueryMsg) -> StdResult<Binary> {
    let WormholeQueryMsg::VerifyVAA { vaa, .. } = msg;
    let data = vaa.as_slice();
    if data.len() < 57 {
        return Err(StdError::generic_err("InvalidVAA"));
    }
    let guardian_set_index = u32::from_be_bytes(data[1..5].try_into().unwrap());
    if guardian_set_index != 0 {
        return Err(StdError::generic_err("GuardianSetExpired"));
    }

    let body = &data[6..];
    let hash = Keccak256::digest(Keccak256::digest(body)).to_vec();
    to_json_binary(&ParsedVAA {
        version: data[0],
        guardian_set_index,
        timestamp: u32::from_be_bytes(body[0..4].try_into().unwrap()),
        nonce: u32::from_be_bytes(body[4..8].try_into().unwrap()),
        len_signers: data[5],
        emitter_chain: u16::from_be_bytes(body[8..10].try_into().unwrap()),
        emitter_address: body[10..42].to_vec(),
        sequence: u64::from_be_bytes(body[42..50].try_into().unwrap()),
        consistency_level: body[50],
        payload: body[51..].to_vec(),
        hash,
    })
}

pub fn build_vaa(
    guardian_set_index: u32,
    emitter_chain: u16,
    emitter_address: [u8; 32],
    sequence: u64,
    payload: &[u8],
) -> Binary {
    let mut data = vec![1u8];
    data.extend_from_slice(&guardian_set_index.to_be_bytes());
    data.push(0);
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&emitter_chain.to_be_bytes());
    data.extend_from_slice(&emitter_address);
    data.extend_from_slice(&sequence.to_be_bytes());
    data.push(1);
    data.extend_from_slice(payload);
    data.into()
}

pub fn governance_vaa(sequence: u64, action: GovernanceAction) -> Binary {
    let payload = GovernanceInstruction {
        module: GovernanceModule::Target,
        target_chain: CHAIN_ID,
        action,
    }
    .serialize()
    .unwrap();
    build_vaa(0, GOV_CHAIN, GOV_ADDRESS, sequence, &payload)
}

pub struct Contracts {
    pub app: App,
    pub oracle: Addr,
}

impl Contracts {
    pub fn submit(&mut self, data: Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(OWNER),
            self.oracle.clone(),
            &ExecuteMsg::ExecuteGovernanceInstruction { data },
            &[],
        )
    }

    pub fn stale_price_threshold(&self) -> u64 {
        let res: StalePriceThresholdResponse = self
            .app
            .wrap()
            .query_wasm_smart(self.oracle.clone(), &QueryMsg::StalePriceThreshold {})
            .unwrap();
        res.threshold_secs
    }
}

pub fn instantiate_contracts(stale_price_threshold_secs: u64) -> Contracts {
    let mut app = App::default();

    let wormhole_code = app.store_code(Box::new(ContractWrapper::new(
        wormhole_execute,
        wormhole_instantiate,
        wormhole_query,
    )));
    let wormhole = app
        .instantiate_contract(
            wormhole_code,
            Addr::unchecked(OWNER),
            &Empty {},
            &[],
            "wormhole",
            None,
        )
        .unwrap();

    let oracle_code = app.store_code(Box::new(
        ContractWrapper::new(execute, instantiate, query).with_migrate(migrate),
    ));
    let oracle = app
        .instantiate_contract(
            oracle_code,
            Addr::unchecked(OWNER),
            &InstantiateMsg {
                wormhole_contract: wormhole.to_string(),
                chain_id: CHAIN_ID,
                governance_source: PythDataSource {
                    emitter_chain: GOV_CHAIN,
                    emitter_address: Binary::from(GOV_ADDRESS),
                },
                governance_sequence_number: 0,
                data_sources: vec![],
                stale_price_threshold_secs,
            },
            &[],
            "pyth",
            None,
        )
        .unwrap();

    Contracts { app, oracle }
}
