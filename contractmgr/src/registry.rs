// SPDX-License-Identifier: Apache-2.0

use koine::Contract;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Returned when a contract is created under an id that is already taken.
#[derive(Debug, thiserror::Error)]
#[error("contract {0} already exists")]
pub struct Conflict(pub String);

/// In-memory store of contracts keyed by id.
///
/// Cloning is cheap; every clone sees the same contracts.
#[derive(Clone, Default)]
pub struct Registry {
    contracts: Arc<RwLock<BTreeMap<String, Contract>>>,
}

fn assign_id(contract: &mut Contract) -> String {
    match contract.id().filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => {
            let id = Uuid::new_v4().to_hyphenated().to_string();
            contract.set_id(Some(id.clone()));
            id
        }
    }
}

impl Registry {
    /// Builds a registry preloaded with `contracts`; later duplicates win.
    pub fn with_contracts(contracts: impl IntoIterator<Item = Contract>) -> Self {
        let mut map = BTreeMap::new();
        for mut contract in contracts {
            let id = assign_id(&mut contract);
            map.insert(id, contract);
        }

        Self {
            contracts: Arc::new(RwLock::new(map)),
        }
    }

    /// All contracts, ordered by id.
    pub async fn list(&self) -> Vec<Contract> {
        self.contracts.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<Contract> {
        self.contracts.read().await.get(id).cloned()
    }

    /// Stores a new contract, assigning it an id if it has none.
    pub async fn create(&self, mut contract: Contract) -> Result<Contract, Conflict> {
        let id = assign_id(&mut contract);

        let mut contracts = self.contracts.write().await;
        if contracts.contains_key(&id) {
            return Err(Conflict(id));
        }

        contracts.insert(id, contract.clone());
        Ok(contract)
    }

    /// Stores `contract` under `id`, replacing whatever was there.
    ///
    /// Returns the stored contract and whether it replaced an existing one.
    pub async fn replace(&self, id: String, mut contract: Contract) -> (Contract, bool) {
        contract.set_id(Some(id.clone()));
        let previous = self.contracts.write().await.insert(id, contract.clone());
        (contract, previous.is_some())
    }

    pub async fn remove(&self, id: &str) -> Option<Contract> {
        self.contracts.write().await.remove(id)
    }

    pub async fn count(&self) -> usize {
        self.contracts.read().await.len()
    }
}
