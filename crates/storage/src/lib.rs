mod error;
mod file;
mod memory;
mod record;
mod traits;

pub mod conformance;

pub use error::StorageError;
pub use file::JsonDirStore;
pub use memory::MemoryStore;
pub use record::ContractSummary;
pub use traits::ContractStore;
