//! Contract records: the document a template produces, its signing state and
//! its append-only version history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Bindings, ContractType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    #[default]
    Draft,
    Sent,
    Signed,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Sent => "sent",
            ContractStatus::Signed => "signed",
            ContractStatus::Cancelled => "cancelled",
        }
    }
}

/// One of the two canonical signing parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Provider,
    Client,
}

impl Party {
    pub const ALL: [Party; 2] = [Party::Provider, Party::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Provider => "provider",
            Party::Client => "client",
        }
    }

    pub fn parse(s: &str) -> Option<Party> {
        Party::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

/// What a signing anchor captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Signature,
    Date,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Signature => "signature",
            FieldKind::Date => "date",
        }
    }

    /// Anchor token prefix used in markup, e.g. `signature_placeholder_`.
    pub fn placeholder_prefix(&self) -> &'static str {
        match self {
            FieldKind::Signature => "signature_placeholder_",
            FieldKind::Date => "date_placeholder_",
        }
    }
}

/// A signing field placed on the rendered document by the signing UI.
///
/// Coordinates are measured in interactive mode and reused for PDF output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureField {
    pub id: String,
    pub party: Party,
    pub kind: FieldKind,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// One field-level delta between two bindings maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub field: String,
    pub label: String,
    pub before: Value,
    pub after: Value,
}

/// Immutable snapshot of a contract's bindings at a given version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractVersion {
    pub version: u32,
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub modified_by: String,
    #[serde(default)]
    pub changes: Vec<ChangeRecord>,
    pub variables: Bindings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    Created,
    Revised,
    Sent,
    Signed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub kind: AuditKind,
    /// RFC 3339 timestamp.
    pub at: String,
    pub actor: String,
    #[serde(default)]
    pub details: Value,
}

/// A contract instance created from a template plus bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub contract_type: ContractType,
    pub title: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub status: ContractStatus,
    pub version: u32,
    #[serde(default)]
    pub variables: Bindings,
    /// Captured signing values keyed by [`SignatureField::id`].
    #[serde(default)]
    pub field_values: BTreeMap<String, String>,
    #[serde(default)]
    pub signature_fields: Vec<SignatureField>,
    #[serde(default)]
    pub history: Vec<ContractVersion>,
    #[serde(default)]
    pub audit_trail: Vec<AuditEvent>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Contract {
    /// The captured value for `party`'s `kind` field, if the signing UI
    /// placed one and a non-empty value was recorded for it.
    pub fn captured_value(&self, party: Party, kind: FieldKind) -> Option<&str> {
        self.signature_fields
            .iter()
            .filter(|f| f.party == party && f.kind == kind)
            .filter_map(|f| self.field_values.get(&f.id))
            .map(String::as_str)
            .find(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signed_contract() -> Contract {
        let mut field_values = BTreeMap::new();
        field_values.insert("f1".to_string(), "data:image/png;base64,AAA".to_string());
        field_values.insert("f2".to_string(), "   ".to_string());
        Contract {
            id: "c1".into(),
            contract_type: ContractType::Photography,
            title: "t".into(),
            client_name: String::new(),
            client_email: String::new(),
            status: ContractStatus::Sent,
            version: 1,
            variables: Bindings::new(),
            field_values,
            signature_fields: vec![
                SignatureField {
                    id: "f1".into(),
                    party: Party::Client,
                    kind: FieldKind::Signature,
                    page: 0,
                    x: 10.0,
                    y: 20.0,
                    width: 200.0,
                    height: 40.0,
                },
                SignatureField {
                    id: "f2".into(),
                    party: Party::Client,
                    kind: FieldKind::Date,
                    page: 0,
                    x: 10.0,
                    y: 70.0,
                    width: 120.0,
                    height: 24.0,
                },
            ],
            history: vec![],
            audit_trail: vec![],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn captured_value_follows_field_placement() {
        let contract = signed_contract();
        assert_eq!(
            contract.captured_value(Party::Client, FieldKind::Signature),
            Some("data:image/png;base64,AAA")
        );
        assert_eq!(contract.captured_value(Party::Provider, FieldKind::Signature), None);
    }

    #[test]
    fn blank_captured_value_is_ignored() {
        let contract = signed_contract();
        assert_eq!(contract.captured_value(Party::Client, FieldKind::Date), None);
    }

    #[test]
    fn contract_deserializes_with_sparse_fields() {
        let contract: Contract = serde_json::from_value(json!({
            "id": "c9",
            "contract_type": "photography",
            "title": "Shoot",
            "version": 3,
            "variables": {"client_name": "Jo"}
        }))
        .unwrap();
        assert_eq!(contract.status, ContractStatus::Draft);
        assert_eq!(contract.variables.get("client_name"), Some(&json!("Jo")));
        assert!(contract.history.is_empty());
    }

    #[test]
    fn party_names_parse() {
        assert_eq!(Party::parse("provider"), Some(Party::Provider));
        assert_eq!(Party::parse("witness"), None);
    }
}
