// SPDX-License-Identifier: Apache-2.0

use super::id::HasId;
use super::item::ContractItem;
use super::kind::ContractType;
use super::plugin::PluginContract;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Metadata describing a plugin contract definition.
///
/// The record is a plain value: it validates nothing and none of its
/// methods can fail. Collections are moved in by their setters, so a
/// caller keeps no handle to a set once it has been stored.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Contract {
    id: Option<String>,
    name: Option<String>,
    version: Option<i32>,

    #[serde(rename = "type")]
    contract_type: Option<ContractType>,

    contract_items: BTreeSet<ContractItem>,
    plugin_contracts: BTreeSet<PluginContract>,
}

impl Contract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn set_version(&mut self, version: Option<i32>) {
        self.version = version;
    }

    pub fn contract_type(&self) -> Option<ContractType> {
        self.contract_type
    }

    pub fn set_contract_type(&mut self, contract_type: Option<ContractType>) {
        self.contract_type = contract_type;
    }

    pub fn contract_items(&self) -> &BTreeSet<ContractItem> {
        &self.contract_items
    }

    pub fn contract_items_mut(&mut self) -> &mut BTreeSet<ContractItem> {
        &mut self.contract_items
    }

    pub fn set_contract_items(&mut self, items: BTreeSet<ContractItem>) {
        self.contract_items = items;
    }

    pub fn plugin_contracts(&self) -> &BTreeSet<PluginContract> {
        &self.plugin_contracts
    }

    pub fn plugin_contracts_mut(&mut self) -> &mut BTreeSet<PluginContract> {
        &mut self.plugin_contracts
    }

    pub fn set_plugin_contracts(&mut self, plugin_contracts: BTreeSet<PluginContract>) {
        self.plugin_contracts = plugin_contracts;
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    pub fn with_contract_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = ContractItem>,
    {
        self.contract_items = items.into_iter().collect();
        self
    }

    pub fn with_plugin_contracts<I>(mut self, plugin_contracts: I) -> Self
    where
        I: IntoIterator<Item = PluginContract>,
    {
        self.plugin_contracts = plugin_contracts.into_iter().collect();
        self
    }
}

impl HasId for Contract {
    fn id(&self) -> Option<&str> {
        Contract::id(self)
    }

    fn set_id(&mut self, id: Option<String>) {
        Contract::set_id(self, id)
    }
}
