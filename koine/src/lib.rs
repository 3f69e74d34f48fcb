// SPDX-License-Identifier: Apache-2.0

#![deny(clippy::all)]

pub mod codec;
mod contract;
mod id;
mod item;
mod kind;
mod plugin;

pub use contract::Contract;
pub use id::HasId;
pub use item::{ContractItem, ContractMessage};
pub use kind::{ContractType, UnknownContractType};
pub use plugin::{PluginContract, PluginContractDirection, UnknownDirection};
