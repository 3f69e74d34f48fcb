// SPDX-License-Identifier: Apache-2.0

use super::id::HasId;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PluginContractDirection {
    In,
    Out,
}

#[derive(Copy, Clone, Debug)]
pub struct UnknownDirection;

impl std::str::FromStr for PluginContractDirection {
    type Err = UnknownDirection;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => Err(UnknownDirection),
        }
    }
}

impl PluginContractDirection {
    pub fn as_str(&self) -> &'static str {
        match *self {
            PluginContractDirection::In => "in",
            PluginContractDirection::Out => "out",
        }
    }
}

/// Links a contract to a plugin that implements it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PluginContract {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub plugin_id: Option<String>,

    pub direction: PluginContractDirection,
}

impl HasId for PluginContract {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
