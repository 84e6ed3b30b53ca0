use quire_core::{Contract, ContractStatus, ContractType};
use serde::{Deserialize, Serialize};

/// Listing view of a stored contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub id: String,
    pub contract_type: ContractType,
    pub title: String,
    pub status: ContractStatus,
    pub version: u32,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub updated_at: String,
}

impl From<&Contract> for ContractSummary {
    fn from(contract: &Contract) -> Self {
        ContractSummary {
            id: contract.id.clone(),
            contract_type: contract.contract_type,
            title: contract.title.clone(),
            status: contract.status,
            version: contract.version,
            updated_at: contract.updated_at.clone(),
        }
    }
}
