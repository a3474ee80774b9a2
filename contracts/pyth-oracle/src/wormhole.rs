use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, QuerierWrapper, StdResult};

/// Query understood by the Wormhole core contract.
#[cw_serde]
pub enum WormholeQueryMsg {
    VerifyVAA { vaa: Binary, block_time: u64 },
}

// Validator Action Approval(VAA) data, as returned by the core contract once the
// guardian signatures and guardian set expiry have been checked.
#[cw_serde]
pub struct ParsedVAA {
    pub version: u8,
    pub guardian_set_index: u32,
    pub timestamp: u32,
    pub nonce: u32,
    pub len_signers: u8,

    pub emitter_chain: u16,
    pub emitter_address: Vec<u8>,
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Vec<u8>,

    pub hash: Vec<u8>,
}

/// Checks authenticity and freshness of a signed VAA.
pub trait VaaVerifier {
    fn verify_and_parse(&self, vaa: &[u8], block_time: u64) -> StdResult<ParsedVAA>;
}

/// Verifies VAAs by querying a deployed Wormhole core contract.
pub struct WormholeVerifier<'a> {
    querier: &'a QuerierWrapper<'a>,
    contract: &'a str,
}

impl<'a> WormholeVerifier<'a> {
    pub fn new(querier: &'a QuerierWrapper<'a>, contract: &'a str) -> Self {
        WormholeVerifier { querier, contract }
    }
}

impl VaaVerifier for WormholeVerifier<'_> {
    fn verify_and_parse(&self, vaa: &[u8], block_time: u64) -> StdResult<ParsedVAA> {
        self.querier.query_wasm_smart(
            self.contract,
            &WormholeQueryMsg::VerifyVAA {
                vaa: Binary::from(vaa),
                block_time,
            },
        )
    }
}
