use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    /// Input ended before a fixed-width field could be read
    #[error("TruncatedInput: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// Input was longer than the layout being decoded
    #[error("TrailingBytes: {0} unconsumed bytes")]
    TrailingBytes(usize),

    /// Governance payload does not start with the Pyth governance magic
    #[error("InvalidGovernanceMagic")]
    InvalidGovernanceMagic,

    /// Governance action code not recognized
    #[error("UnknownAction: {0}")]
    UnknownAction(u8),

    /// Governance instruction addressed to another module
    #[error("WrongModule: {0}")]
    WrongModule(u8),

    /// Target chain id is neither the wildcard nor this chain
    #[error("WrongTargetChain: {0}")]
    WrongTargetChain(u16),

    /// VAA emitter is not the configured governance source
    #[error("UntrustedSource: chain {emitter_chain}, emitter {emitter_address}")]
    UntrustedSource {
        emitter_chain: u16,
        emitter_address: String,
    },

    /// Wormhole rejected the VAA signatures or guardian set
    #[error("StaleOrUnverifiable: {0}")]
    StaleOrUnverifiable(String),

    /// Governance VAA already executed or older than the last executed one
    #[error("SequenceReplay: sequence {sequence}, last executed {last_executed}")]
    SequenceReplay { sequence: u64, last_executed: u64 },

    /// Payload decoded but violates the action's invariants
    #[error("InvalidPayload: {0}")]
    InvalidPayload(String),

    #[error("PriceFeedNotFound")]
    PriceFeedNotFound,

    #[error("StalePrice: published at {publish_time}, threshold {threshold_secs}s")]
    StalePrice {
        publish_time: i64,
        threshold_secs: u64,
    },
}
