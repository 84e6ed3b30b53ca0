use quire_core::ContractType;
use quire_storage::StorageError;

/// Errors raised while authoring or revising a contract.
///
/// Rendering and traversal never fail; only the steps that need a template
/// lookup or touch the store do.
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    #[error("contract not found: {id}")]
    ContractNotFound { id: String },

    #[error("no template registered for contract type '{0}'")]
    TemplateNotFound(ContractType),

    /// The question flow has not reached review yet.
    #[error("question flow is not complete")]
    Incomplete,

    #[error("required answers missing: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RevisionError {
    /// Whether the failure was another session saving first.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RevisionError::Storage(StorageError::ConcurrentConflict { .. })
        )
    }
}
