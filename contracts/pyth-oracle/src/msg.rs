use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

use crate::state::{PriceFeed, PythDataSource};

type HumanAddr = String;

/// The instantiation parameters of the oracle. See [`crate::state::ConfigInfo`]
/// for more details on what these fields mean.
#[cw_serde]
pub struct InstantiateMsg {
    pub wormhole_contract: HumanAddr,
    pub chain_id: u16,

    pub governance_source: PythDataSource,
    /// Sequence of the last governance VAA considered executed.
    pub governance_sequence_number: u64,

    pub data_sources: Vec<PythDataSource>,
    pub stale_price_threshold_secs: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Submit a governance VAA signed by the Wormhole guardians.
    ExecuteGovernanceInstruction { data: Binary },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(StalePriceThresholdResponse)]
    StalePriceThreshold {},

    #[returns(GovernanceInfoResponse)]
    GovernanceInfo {},

    #[returns(DataSourcesResponse)]
    DataSources {},

    /// The stored feed, regardless of its age.
    #[returns(PriceFeed)]
    PriceFeed { id: Binary },

    /// The stored feed, failing if it is older than the stale price threshold.
    #[returns(PriceFeed)]
    Price { id: Binary },
}

#[cw_serde]
pub struct StalePriceThresholdResponse {
    pub threshold_secs: u64,
}

#[cw_serde]
pub struct GovernanceInfoResponse {
    pub governance_source: PythDataSource,
    pub governance_sequence_number: u64,
    pub chain_id: u16,
}

#[cw_serde]
pub struct DataSourcesResponse {
    pub data_sources: Vec<PythDataSource>,
}
