//! Pyth governance instructions carried in the payload of governance VAAs.
//!
//! Wire format:
//!
//! ```text
//! 0   [4]uint8   magic ("PTGM")
//! 4   uint8      module
//! 5   uint8      action
//! 6   uint16     target chain (0 = all chains)
//! 8   []uint8    action payload
//! ```
//!
//! The set of actions is closed: every action is a [`GovernanceAction`]
//! variant, and each variant's payload type implements [`GovernancePayload`].

use cosmwasm_std::{DepsMut, Env, Response};

use crate::{byte_utils::ByteCursor, error::ContractError, receipt::GovernanceWitness};

mod set_data_sources;
mod set_governance_data_source;
mod set_stale_price_threshold;
mod upgrade_contract;

pub use set_data_sources::SetDataSources;
pub use set_governance_data_source::SetGovernanceDataSource;
pub use set_stale_price_threshold::SetStalePriceThreshold;
pub use upgrade_contract::UpgradeContract;

pub const GOVERNANCE_MAGIC: [u8; 4] = *b"PTGM";

/// Target chain id accepted by every deployment.
pub const ALL_CHAINS: u16 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GovernanceModule {
    /// Actions executed by the Pyth receiver on the target chain.
    Target = 1,
}

impl TryFrom<u8> for GovernanceModule {
    type Error = ContractError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GovernanceModule::Target),
            other => Err(ContractError::WrongModule(other)),
        }
    }
}

/// A decoded action payload: knows its discriminator, its byte layout, its
/// invariants, and the state change it makes.
pub trait GovernancePayload: Sized {
    const ACTION: u8;

    fn parse(cursor: &mut ByteCursor) -> Result<Self, ContractError>;

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ContractError>;

    fn validate(&self) -> Result<(), ContractError> {
        Ok(())
    }

    /// Applies the change. Only called after `validate` succeeded.
    fn apply(
        self,
        witness: &GovernanceWitness,
        deps: DepsMut,
        env: &Env,
    ) -> Result<Response, ContractError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceAction {
    UpgradeContract(UpgradeContract),
    SetGovernanceDataSource(SetGovernanceDataSource),
    SetDataSources(SetDataSources),
    SetStalePriceThreshold(SetStalePriceThreshold),
}

impl GovernanceAction {
    pub fn id(&self) -> u8 {
        match self {
            GovernanceAction::UpgradeContract(_) => UpgradeContract::ACTION,
            GovernanceAction::SetGovernanceDataSource(_) => SetGovernanceDataSource::ACTION,
            GovernanceAction::SetDataSources(_) => SetDataSources::ACTION,
            GovernanceAction::SetStalePriceThreshold(_) => SetStalePriceThreshold::ACTION,
        }
    }

    fn parse(action: u8, cursor: &mut ByteCursor) -> Result<Self, ContractError> {
        match action {
            UpgradeContract::ACTION => UpgradeContract::parse(cursor).map(Self::UpgradeContract),
            SetGovernanceDataSource::ACTION => {
                SetGovernanceDataSource::parse(cursor).map(Self::SetGovernanceDataSource)
            }
            SetDataSources::ACTION => SetDataSources::parse(cursor).map(Self::SetDataSources),
            SetStalePriceThreshold::ACTION => {
                SetStalePriceThreshold::parse(cursor).map(Self::SetStalePriceThreshold)
            }
            other => Err(ContractError::UnknownAction(other)),
        }
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ContractError> {
        match self {
            GovernanceAction::UpgradeContract(p) => p.write(out),
            GovernanceAction::SetGovernanceDataSource(p) => p.write(out),
            GovernanceAction::SetDataSources(p) => p.write(out),
            GovernanceAction::SetStalePriceThreshold(p) => p.write(out),
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        match self {
            GovernanceAction::UpgradeContract(p) => p.validate(),
            GovernanceAction::SetGovernanceDataSource(p) => p.validate(),
            GovernanceAction::SetDataSources(p) => p.validate(),
            GovernanceAction::SetStalePriceThreshold(p) => p.validate(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GovernanceInstruction {
    pub module: GovernanceModule,
    pub target_chain: u16,
    pub action: GovernanceAction,
}

impl GovernanceInstruction {
    /// Decodes a complete governance payload. The whole buffer must be consumed.
    pub fn deserialize(data: &[u8]) -> Result<Self, ContractError> {
        let mut cursor = ByteCursor::new(data);

        if cursor.read_const_bytes::<4>()? != GOVERNANCE_MAGIC {
            return Err(ContractError::InvalidGovernanceMagic);
        }
        let module = GovernanceModule::try_from(cursor.read_u8()?)?;
        let action = cursor.read_u8()?;
        let target_chain = cursor.read_u16()?;
        let action = GovernanceAction::parse(action, &mut cursor)?;
        cursor.finish()?;

        Ok(GovernanceInstruction {
            module,
            target_chain,
            action,
        })
    }

    pub fn serialize(&self) -> Result<Vec<u8>, ContractError> {
        let mut out = Vec::with_capacity(8 + 32);
        out.extend_from_slice(&GOVERNANCE_MAGIC);
        out.push(self.module as u8);
        out.push(self.action.id());
        out.extend_from_slice(&self.target_chain.to_be_bytes());
        self.action.write(&mut out)?;
        Ok(out)
    }

    pub fn check_target_chain(&self, chain_id: u16) -> Result<(), ContractError> {
        if self.target_chain != ALL_CHAINS && self.target_chain != chain_id {
            return Err(ContractError::WrongTargetChain(self.target_chain));
        }
        Ok(())
    }
}
