use std::path::PathBuf;

use crate::model::ContractType;

/// Errors raised while loading a template registry from disk.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries declare the same contract type.
    #[error("duplicate template for contract type '{0}'")]
    DuplicateType(ContractType),

    /// An entry declares a contract type this build does not know.
    #[error("template '{0}' has an unknown contract type")]
    UnknownType(String),
}
