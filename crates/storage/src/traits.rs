use async_trait::async_trait;
use quire_core::Contract;

use crate::error::StorageError;
use crate::record::ContractSummary;

/// The persistence collaborator for contracts.
///
/// The engine treats every call as an opaque request: it does not know the
/// storage technology and performs no retries. A failed call leaves the
/// caller's in-memory state untouched.
///
/// ## OCC Conflict Detection
///
/// `update_contract` replaces a stored contract only if its stored `version`
/// still equals `expected_version`; otherwise it returns
/// `Err(StorageError::ConcurrentConflict { .. })`. Two sessions revising the
/// same contract therefore cannot silently overwrite each other.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` so they can be shared
/// across async task boundaries.
#[async_trait]
pub trait ContractStore: Send + Sync + 'static {
    /// Read a contract by id. Returns `Ok(None)` if it does not exist.
    async fn get_contract(&self, id: &str) -> Result<Option<Contract>, StorageError>;

    /// Store a new contract.
    ///
    /// Returns `Err(StorageError::AlreadyExists)` if the id is taken.
    async fn insert_contract(&self, contract: Contract) -> Result<Contract, StorageError>;

    /// Replace a stored contract, conditional on the stored version (OCC).
    ///
    /// Returns `Err(StorageError::NotFound)` if the contract does not exist.
    async fn update_contract(
        &self,
        contract: Contract,
        expected_version: u32,
    ) -> Result<Contract, StorageError>;

    /// List every stored contract, ordered by id.
    async fn list_contracts(&self) -> Result<Vec<ContractSummary>, StorageError>;
}
