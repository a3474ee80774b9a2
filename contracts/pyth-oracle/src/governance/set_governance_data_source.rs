use cosmwasm_std::{Binary, DepsMut, Env, Response};

use super::{GovernancePayload, ALL_CHAINS};
use crate::{
    byte_utils::ByteCursor,
    error::ContractError,
    receipt::GovernanceWitness,
    state::{set_governance_sequence, set_governance_source, PythDataSource},
};

/// Hands governance over to a new emitter. Sequence numbers restart from
/// `initial_sequence` because they are only ordered per emitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetGovernanceDataSource {
    pub source: PythDataSource,
    pub initial_sequence: u64,
}

impl GovernancePayload for SetGovernanceDataSource {
    const ACTION: u8 = 1;

    fn parse(cursor: &mut ByteCursor) -> Result<Self, ContractError> {
        let emitter_chain = cursor.read_u16()?;
        let emitter_address = cursor.read_const_bytes::<32>()?;
        let initial_sequence = cursor.read_u64()?;

        Ok(SetGovernanceDataSource {
            source: PythDataSource {
                emitter_chain,
                emitter_address: Binary::from(emitter_address),
            },
            initial_sequence,
        })
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ContractError> {
        out.extend_from_slice(&self.source.emitter_chain.to_be_bytes());
        out.extend_from_slice(self.source.emitter_address.as_slice());
        out.extend_from_slice(&self.initial_sequence.to_be_bytes());
        Ok(())
    }

    fn validate(&self) -> Result<(), ContractError> {
        if self.source.emitter_chain == ALL_CHAINS {
            return Err(ContractError::InvalidPayload(
                "governance emitter chain must be set".to_string(),
            ));
        }
        Ok(())
    }

    fn apply(
        self,
        witness: &GovernanceWitness,
        deps: DepsMut,
        _env: &Env,
    ) -> Result<Response, ContractError> {
        let response = Response::new()
            .add_attribute("action", "set_governance_data_source")
            .add_attribute("emitter_chain", self.source.emitter_chain.to_string())
            .add_attribute(
                "emitter_address",
                hex::encode(self.source.emitter_address.as_slice()),
            )
            .add_attribute("initial_sequence", self.initial_sequence.to_string());

        set_governance_source(witness, deps.storage, self.source)?;
        set_governance_sequence(witness, deps.storage, self.initial_sequence)?;

        Ok(response)
    }
}
