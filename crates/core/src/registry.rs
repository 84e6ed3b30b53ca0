//! Template registry: contract type -> template + question flow.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builtin;
use crate::error::RegistryError;
use crate::model::{ContractType, Template};
use crate::question::QuestionFlowItem;

/// A registered template together with its question flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub template: Template,
    #[serde(default)]
    pub questions: Vec<QuestionFlowItem>,
}

/// Lookup from contract type to template and question flow.
///
/// Unknown types resolve to no template and an empty flow.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: BTreeMap<ContractType, TemplateEntry>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        TemplateRegistry::default()
    }

    /// The code-defined templates shipped with Quire.
    pub fn builtin() -> Self {
        let mut registry = TemplateRegistry::new();
        for entry in builtin::entries() {
            registry.register(entry.template, entry.questions);
        }
        registry
    }

    /// Register (or replace) the template for its contract type.
    pub fn register(&mut self, template: Template, questions: Vec<QuestionFlowItem>) {
        self.entries.insert(
            template.contract_type,
            TemplateEntry {
                template,
                questions,
            },
        );
    }

    pub fn template(&self, contract_type: ContractType) -> Option<&Template> {
        self.entries.get(&contract_type).map(|e| &e.template)
    }

    pub fn questions(&self, contract_type: ContractType) -> &[QuestionFlowItem] {
        self.entries
            .get(&contract_type)
            .map(|e| e.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn entry(&self, contract_type: ContractType) -> Option<&TemplateEntry> {
        self.entries.get(&contract_type)
    }

    pub fn entries(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a registry from a JSON array of [`TemplateEntry`] objects.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<TemplateEntry> = serde_json::from_str(json)?;
        let mut registry = TemplateRegistry::new();
        for entry in entries {
            let ct = entry.template.contract_type;
            if ct == ContractType::Unknown {
                return Err(RegistryError::UnknownType(entry.template.id));
            }
            if registry.entries.contains_key(&ct) {
                return Err(RegistryError::DuplicateType(ct));
            }
            registry.register(entry.template, entry.questions);
        }
        Ok(registry)
    }

    /// Load a registry JSON file written by admin template tooling.
    pub fn load_json(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        TemplateRegistry::from_json_str(&content)
    }

    /// Serialize every entry as a JSON array, the format `from_json_str` reads.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.values().collect::<Vec<_>>())
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_known_type() {
        let registry = TemplateRegistry::builtin();
        for ct in ContractType::KNOWN {
            let template = registry.template(ct).expect("template registered");
            assert_eq!(template.contract_type, ct);
            assert!(!registry.questions(ct).is_empty());
        }
    }

    #[test]
    fn unknown_type_yields_nothing() {
        let registry = TemplateRegistry::builtin();
        assert!(registry.template(ContractType::Unknown).is_none());
        assert!(registry.questions(ContractType::Unknown).is_empty());
    }

    #[test]
    fn json_round_trip_preserves_entries() {
        let registry = TemplateRegistry::builtin();
        let json = serde_json::to_string(&registry.to_json()).unwrap();
        let reloaded = TemplateRegistry::from_json_str(&json).unwrap();
        assert_eq!(reloaded.len(), registry.len());
        for ct in ContractType::KNOWN {
            assert_eq!(reloaded.entry(ct), registry.entry(ct));
        }
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let registry = TemplateRegistry::builtin();
        let entry = registry.entry(ContractType::Photography).unwrap();
        let json = serde_json::to_string(&vec![entry, entry]).unwrap();
        let err = TemplateRegistry::from_json_str(&json).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateType(ContractType::Photography)
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = TemplateRegistry::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
