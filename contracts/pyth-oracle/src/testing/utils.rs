use cosmwasm_std::{
    from_json,
    testing::{mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage},
    to_json_binary, Binary, ContractResult, Env, OwnedDeps, QuerierResult, Response,
    SystemError, SystemResult, Timestamp, WasmQuery,
};
use sha3::{Digest, Keccak256};

use crate::{
    contract::{execute, instantiate},
    error::ContractError,
    governance::{GovernanceAction, GovernanceInstruction, GovernanceModule},
    msg::{ExecuteMsg, InstantiateMsg},
    state::PythDataSource,
    wormhole::{ParsedVAA, WormholeQueryMsg},
};

pub const WORMHOLE_ADDR: &str = "wormhole";
pub const CHAIN_ID: u16 = 21;
pub const GOV_CHAIN: u16 = 1;
pub const GOV_ADDRESS: [u8; 32] = [
    0x56, 0x35, 0x97, 0x9a, 0x22, 0x1c, 0x34, 0x93, 0x1e, 0x32, 0x62, 0x0b, 0x92, 0x93, 0xa4, 0x63,
    0x06, 0x55, 0x55, 0xea, 0x71, 0xfe, 0x97, 0xcd, 0x6e, 0x23, 0x7a, 0xde, 0x87, 0x5b, 0x12, 0xe9,
];
pub const INITIAL_THRESHOLD: u64 = 60;

/// A VAA that stands in for a guardian-signed one: it has no signatures, and
/// a guardian set index other than 0 makes the mocked core contract reject it.
pub struct TestVaa {
    pub guardian_set_index: u32,
    pub timestamp: u32,
    pub emitter_chain: u16,
    pub emitter_address: [u8; 32],
    pub sequence: u64,
    pub payload: Vec<u8>,
}

impl TestVaa {
    pub fn governance(sequence: u64, payload: Vec<u8>) -> Self {
        TestVaa {
            guardian_set_index: 0,
            timestamp: sequence as u32,
            emitter_chain: GOV_CHAIN,
            emitter_address: GOV_ADDRESS,
            sequence,
            payload,
        }
    }

    pub fn body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(51 + self.payload.len());
        body.extend_from_slice(&self.timestamp.to_be_bytes());
        body.extend_from_slice(&0u32.to_be_bytes()); // nonce
        body.extend_from_slice(&self.emitter_chain.to_be_bytes());
        body.extend_from_slice(&self.emitter_address);
        body.extend_from_slice(&self.sequence.to_be_bytes());
        body.push(1); // consistency level
        body.extend_from_slice(&self.payload);
        body
    }

    pub fn to_binary(&self) -> Binary {
        let mut data = vec![1u8];
        data.extend_from_slice(&self.guardian_set_index.to_be_bytes());
        data.push(0); // no signatures
        data.extend_from_slice(&self.body());
        data.into()
    }
}

pub fn governance_payload(target_chain: u16, action: GovernanceAction) -> Vec<u8> {
    GovernanceInstruction {
        module: GovernanceModule::Target,
        target_chain,
        action,
    }
    .serialize()
    .unwrap()
}

fn digest(body: &[u8]) -> Vec<u8> {
    let hash = Keccak256::digest(body);
    Keccak256::digest(hash).to_vec()
}

fn parse_test_vaa(data: &[u8]) -> Result<ParsedVAA, String> {
    const BODY_POS: usize = 6;
    const PAYLOAD_POS: usize = BODY_POS + 51;

    if data.len() < PAYLOAD_POS {
        return Err("InvalidVAA".to_string());
    }
    if data[0] != 1 {
        return Err("InvalidVersion".to_string());
    }
    let guardian_set_index = u32::from_be_bytes(data[1..5].try_into().unwrap());
    if guardian_set_index != 0 {
        return Err("GuardianSetExpired".to_string());
    }

    let body = &data[BODY_POS..];
    Ok(ParsedVAA {
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
        hash: digest(body),
    })
}

fn wormhole_handler(query: &WasmQuery) -> QuerierResult {
    match query {
        WasmQuery::Smart { contract_addr, msg } if contract_addr == WORMHOLE_ADDR => {
            let WormholeQueryMsg::VerifyVAA { vaa, .. } = from_json(msg).unwrap();
            let result = match parse_test_vaa(vaa.as_slice()) {
                Ok(parsed) => ContractResult::Ok(to_json_binary(&parsed).unwrap()),
                Err(e) => ContractResult::Err(e),
            };
            SystemResult::Ok(result)
        }
        _ => SystemResult::Err(SystemError::UnsupportedRequest {
            kind: "wasm".to_string(),
        }),
    }
}

pub fn instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        wormhole_contract: WORMHOLE_ADDR.to_string(),
        chain_id: CHAIN_ID,
        governance_source: PythDataSource {
            emitter_chain: GOV_CHAIN,
            emitter_address: Binary::from(GOV_ADDRESS),
        },
        governance_sequence_number: 0,
        data_sources: vec![PythDataSource {
            emitter_chain: 26,
            emitter_address: Binary::from([0xe1u8; 32]),
        }],
        stale_price_threshold_secs: INITIAL_THRESHOLD,
    }
}

pub type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

pub fn instantiate_oracle() -> (MockDeps, Response) {
    let mut deps = mock_dependencies();
    deps.querier.update_wasm(wormhole_handler);

    let res = instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("creator", &[]),
        instantiate_msg(),
    )
    .unwrap();

    (deps, res)
}

pub fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

pub fn submit_vaa(deps: &mut MockDeps, vaa: &TestVaa) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        mock_env(),
        mock_info("relayer", &[]),
        ExecuteMsg::ExecuteGovernanceInstruction {
            data: vaa.to_binary(),
        },
    )
}
