use std::collections::BTreeMap;

use async_trait::async_trait;
use quire_core::Contract;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::ContractSummary;
use crate::traits::ContractStore;

/// In-process contract store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contracts: RwLock<BTreeMap<String, Contract>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl ContractStore for MemoryStore {
    async fn get_contract(&self, id: &str) -> Result<Option<Contract>, StorageError> {
        Ok(self.contracts.read().await.get(id).cloned())
    }

    async fn insert_contract(&self, contract: Contract) -> Result<Contract, StorageError> {
        let mut contracts = self.contracts.write().await;
        if contracts.contains_key(&contract.id) {
            return Err(StorageError::AlreadyExists { id: contract.id });
        }
        contracts.insert(contract.id.clone(), contract.clone());
        Ok(contract)
    }

    async fn update_contract(
        &self,
        contract: Contract,
        expected_version: u32,
    ) -> Result<Contract, StorageError> {
        let mut contracts = self.contracts.write().await;
        let stored = contracts
            .get_mut(&contract.id)
            .ok_or_else(|| StorageError::NotFound {
                id: contract.id.clone(),
            })?;
        if stored.version != expected_version {
            tracing::warn!(
                id = %contract.id,
                expected_version,
                found_version = stored.version,
                "rejected stale contract update"
            );
            return Err(StorageError::ConcurrentConflict {
                id: contract.id,
                expected_version,
                found_version: stored.version,
            });
        }
        *stored = contract.clone();
        Ok(contract)
    }

    async fn list_contracts(&self) -> Result<Vec<ContractSummary>, StorageError> {
        Ok(self
            .contracts
            .read()
            .await
            .values()
            .map(ContractSummary::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance::run_conformance_suite;

    #[tokio::test]
    async fn memory_store_conformance() {
        let report = run_conformance_suite(|| async { MemoryStore::new() }).await;
        assert!(report.failed == 0, "{report}");
        assert!(report.total > 0);
    }
}
