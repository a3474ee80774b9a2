use cosmwasm_std::{DepsMut, Env, Response};

use super::GovernancePayload;
use crate::{
    byte_utils::ByteCursor,
    error::ContractError,
    receipt::GovernanceWitness,
    state::set_stale_price_threshold_secs,
};

/// Sets the maximum age, in seconds, of a usable price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetStalePriceThreshold {
    pub threshold: u64,
}

impl GovernancePayload for SetStalePriceThreshold {
    const ACTION: u8 = 4;

    fn parse(cursor: &mut ByteCursor) -> Result<Self, ContractError> {
        let threshold = cursor.read_u64()?;
        Ok(SetStalePriceThreshold { threshold })
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ContractError> {
        out.extend_from_slice(&self.threshold.to_be_bytes());
        Ok(())
    }

    fn validate(&self) -> Result<(), ContractError> {
        if self.threshold == 0 {
            return Err(ContractError::InvalidPayload(
                "stale price threshold must be positive".to_string(),
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
        set_stale_price_threshold_secs(witness, deps.storage, self.threshold)?;

        Ok(Response::new()
            .add_attribute("action", "set_stale_price_threshold")
            .add_attribute("threshold_secs", self.threshold.to_string()))
    }
}
