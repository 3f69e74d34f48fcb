// SPDX-License-Identifier: Apache-2.0

use super::id::HasId;

use serde::{Deserialize, Serialize};

/// A message schema consumed or produced by a contract item.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ContractMessage {
    #[serde(default)]
    pub id: Option<String>,

    /// Fully-qualified schema name
    pub fqn: String,

    pub version: i32,
}

/// A single capability defined by a contract.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContractItem {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub in_message: Option<ContractMessage>,

    #[serde(default)]
    pub out_message: Option<ContractMessage>,
}

impl ContractItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            in_message: None,
            out_message: None,
        }
    }
}

impl HasId for ContractMessage {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl HasId for ContractItem {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
