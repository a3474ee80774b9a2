use cosmwasm_std::{Binary, DepsMut, Env, Response};

use super::GovernancePayload;
use crate::{
    byte_utils::ByteCursor,
    error::ContractError,
    receipt::GovernanceWitness,
    state::{set_data_sources, PythDataSource},
};

/// Replaces the set of emitters trusted to publish prices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDataSources {
    pub data_sources: Vec<PythDataSource>,
}

impl SetDataSources {
    // the wire format carries the number of sources in a single byte
    fn count(&self) -> Result<u8, ContractError> {
        u8::try_from(self.data_sources.len()).map_err(|_| {
            ContractError::InvalidPayload(format!(
                "too many data sources: {}",
                self.data_sources.len()
            ))
        })
    }
}

impl GovernancePayload for SetDataSources {
    const ACTION: u8 = 2;

    fn parse(cursor: &mut ByteCursor) -> Result<Self, ContractError> {
        let count = cursor.read_u8()?;
        let mut data_sources = Vec::with_capacity(count.into());
        for _ in 0..count {
            let emitter_chain = cursor.read_u16()?;
            let emitter_address = cursor.read_const_bytes::<32>()?;
            data_sources.push(PythDataSource {
                emitter_chain,
                emitter_address: Binary::from(emitter_address),
            });
        }

        Ok(SetDataSources { data_sources })
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ContractError> {
        out.push(self.count()?);
        for source in &self.data_sources {
            out.extend_from_slice(&source.emitter_chain.to_be_bytes());
            out.extend_from_slice(source.emitter_address.as_slice());
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ContractError> {
        self.count()?;
        for (i, source) in self.data_sources.iter().enumerate() {
            if self.data_sources[..i].contains(source) {
                return Err(ContractError::InvalidPayload(format!(
                    "duplicate data source: chain {}, emitter {}",
                    source.emitter_chain,
                    hex::encode(source.emitter_address.as_slice())
                )));
            }
        }
        Ok(())
    }

    fn apply(
        self,
        witness: &GovernanceWitness,
        deps: DepsMut,
        _env: &Env,
    ) -> Result<Response, ContractError> {
        let count = self.data_sources.len();
        set_data_sources(witness, deps.storage, self.data_sources)?;

        Ok(Response::new()
            .add_attribute("action", "set_data_sources")
            .add_attribute("num_data_sources", count.to_string()))
    }
}
