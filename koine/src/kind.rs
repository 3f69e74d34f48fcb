// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Classifies what a contract describes.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// Exposed to endpoints through the SDK.
    Sdk,
    /// Spoken between plugins on the server side.
    Server,
}

#[derive(Copy, Clone, Debug)]
pub struct UnknownContractType;

impl std::str::FromStr for ContractType {
    type Err = UnknownContractType;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "sdk" => Ok(Self::Sdk),
            "server" => Ok(Self::Server),
            _ => Err(UnknownContractType),
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ContractType::Sdk => "sdk",
            ContractType::Server => "server",
        }
    }
}
