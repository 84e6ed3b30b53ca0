/// All errors that can be returned by a ContractStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Optimistic concurrency control conflict: another session saved the
    /// contract since it was loaded. The expected version was not found.
    #[error("concurrent conflict on contract {id}: expected version {expected_version}, found {found_version}")]
    ConcurrentConflict {
        id: String,
        expected_version: u32,
        found_version: u32,
    },

    /// No contract with the given id.
    #[error("contract not found: {id}")]
    NotFound { id: String },

    /// A contract with this id already exists.
    #[error("contract already exists: {id}")]
    AlreadyExists { id: String },

    /// The id cannot be used as a storage key.
    #[error("invalid contract id: {id:?}")]
    InvalidId { id: String },

    /// A backend-specific storage error (I/O, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
