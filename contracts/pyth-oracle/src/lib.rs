pub mod byte_utils;
pub mod contract;
pub mod error;
pub mod events;
pub mod governance;
pub mod msg;
pub mod receipt;
pub mod state;
pub mod wormhole;


pub use crate::error::ContractError;
