use cosmwasm_std::{to_json_binary, CosmosMsg, DepsMut, Env, Response, WasmMsg};

use super::GovernancePayload;
use crate::{
    byte_utils::ByteCursor, error::ContractError, msg::MigrateMsg, receipt::GovernanceWitness,
};

/// Migrates this contract to a new code id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeContract {
    pub code_id: u64,
}

impl GovernancePayload for UpgradeContract {
    const ACTION: u8 = 0;

    fn parse(cursor: &mut ByteCursor) -> Result<Self, ContractError> {
        let code_id = cursor.read_u64()?;
        Ok(UpgradeContract { code_id })
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ContractError> {
        out.extend_from_slice(&self.code_id.to_be_bytes());
        Ok(())
    }

    fn validate(&self) -> Result<(), ContractError> {
        if self.code_id == 0 {
            return Err(ContractError::InvalidPayload(
                "code id must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    fn apply(
        self,
        _witness: &GovernanceWitness,
        _deps: DepsMut,
        env: &Env,
    ) -> Result<Response, ContractError> {
        Ok(Response::new()
            .add_message(CosmosMsg::Wasm(WasmMsg::Migrate {
                contract_addr: env.contract.address.to_string(),
                new_code_id: self.code_id,
                msg: to_json_binary(&MigrateMsg {})?,
            }))
            .add_attribute("action", "contract_upgrade")
            .add_attribute("code_id", self.code_id.to_string()))
    }
}
