//! Two-phase handling of governance VAAs: [`verify`] turns raw bytes into a
//! [`GovernanceReceipt`], and consuming the receipt is the only way to obtain
//! the [`GovernanceWitness`] that governance state setters require.
//!
//! A receipt is moved into execution, so executing it twice does not compile:
//!
//! ```compile_fail
//! use cosmwasm_std::{DepsMut, Env};
//! use pyth_oracle::{contract::execute_governance_instruction, receipt::GovernanceReceipt};
//!
//! fn execute_twice(mut deps: DepsMut, env: Env, receipt: GovernanceReceipt) {
//!     let _ = execute_governance_instruction(deps.branch(), &env, receipt);
//!     let _ = execute_governance_instruction(deps, &env, receipt);
//! }
//! ```

use cosmwasm_std::{StdResult, Storage};

use crate::{
    error::ContractError,
    governance::GovernanceInstruction,
    state::{
        governance_sequence, vaa_archive_add, vaa_archive_check, ConfigInfo, GOVERNANCE_SEQUENCE,
    },
    wormhole::{ParsedVAA, VaaVerifier},
};

/// A VAA whose guardian signatures have been checked by Wormhole.
#[derive(Debug)]
pub struct VerifiedMessage {
    pub emitter_chain: u16,
    pub emitter_address: Vec<u8>,
    pub sequence: u64,
    pub hash: Vec<u8>,
    pub payload: Vec<u8>,
}

impl From<ParsedVAA> for VerifiedMessage {
    fn from(vaa: ParsedVAA) -> Self {
        VerifiedMessage {
            emitter_chain: vaa.emitter_chain,
            emitter_address: vaa.emitter_address,
            sequence: vaa.sequence,
            hash: vaa.hash,
            payload: vaa.payload,
        }
    }
}

/// Proof that a governance VAA passed every check and has not been executed.
#[derive(Debug)]
pub struct GovernanceReceipt {
    emitter_chain: u16,
    sequence: u64,
    hash: Vec<u8>,
    instruction: GovernanceInstruction,
}

/// Capability held while a consumed receipt is being executed.
#[derive(Debug)]
pub struct GovernanceWitness {
    _seal: (),
}

impl GovernanceReceipt {
    pub fn emitter_chain(&self) -> u16 {
        self.emitter_chain
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn instruction(&self) -> &GovernanceInstruction {
        &self.instruction
    }

    /// Marks the VAA as executed and releases the instruction together with
    /// the capability to apply it.
    pub(crate) fn consume(
        self,
        storage: &mut dyn Storage,
    ) -> StdResult<(GovernanceWitness, GovernanceInstruction)> {
        GOVERNANCE_SEQUENCE.save(storage, &self.sequence)?;
        vaa_archive_add(storage, &self.hash)?;

        Ok((GovernanceWitness { _seal: () }, self.instruction))
    }
}

/// Verifies a governance VAA and decodes its instruction.
///
/// Checks, in order: guardian signatures and expiry (delegated to `verifier`),
/// the emitter against the governance source, the sequence against the last
/// executed one, the payload layout, and the target chain.
pub fn verify(
    storage: &dyn Storage,
    cfg: &ConfigInfo,
    verifier: &dyn VaaVerifier,
    data: &[u8],
    block_time: u64,
) -> Result<GovernanceReceipt, ContractError> {
    let vaa: VerifiedMessage = verifier
        .verify_and_parse(data, block_time)
        .map_err(|e| ContractError::StaleOrUnverifiable(e.to_string()))?
        .into();

    if !cfg
        .governance_source
        .matches(vaa.emitter_chain, &vaa.emitter_address)
    {
        return Err(ContractError::UntrustedSource {
            emitter_chain: vaa.emitter_chain,
            emitter_address: hex::encode(&vaa.emitter_address),
        });
    }

    let last_executed = governance_sequence(storage)?;
    if vaa.sequence <= last_executed || vaa_archive_check(storage, &vaa.hash) {
        return Err(ContractError::SequenceReplay {
            sequence: vaa.sequence,
            last_executed,
        });
    }

    let instruction = GovernanceInstruction::deserialize(&vaa.payload)?;
    instruction.check_target_chain(cfg.chain_id)?;

    Ok(GovernanceReceipt {
        emitter_chain: vaa.emitter_chain,
        sequence: vaa.sequence,
        hash: vaa.hash,
        instruction,
    })
}
