//! Template model: variable definitions, clauses and template records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parser::{parse, Document};

/// Concrete key -> value assignment of a template's variables for one contract.
///
/// Values are untyped at rest; numeric coercion happens when an answer is
/// committed (see [`crate::bindings::coerce_answer`]).
pub type Bindings = BTreeMap<String, Value>;

/// Variable that selects between project and subscription engagements.
pub const ENGAGEMENT_TYPE_KEY: &str = "engagement_type";

/// Flags derived from bindings at render time rather than declared as variables.
pub const COMPUTED_FLAGS: &[&str] = &["is_project", "is_subscription"];

/// The kind of contract a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Photography,
    ContentCreation,
    WebDevelopment,
    /// Any contract type this build does not know about.
    #[serde(other)]
    Unknown,
}

impl ContractType {
    /// Every known contract type, in registry order.
    pub const KNOWN: [ContractType; 3] = [
        ContractType::Photography,
        ContractType::ContentCreation,
        ContractType::WebDevelopment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Photography => "photography",
            ContractType::ContentCreation => "content_creation",
            ContractType::WebDevelopment => "web_development",
            ContractType::Unknown => "unknown",
        }
    }

    /// Parse a contract type name. Unrecognized names map to [`ContractType::Unknown`].
    pub fn parse(s: &str) -> ContractType {
        ContractType::KNOWN
            .into_iter()
            .find(|ct| ct.as_str() == s.trim())
            .unwrap_or(ContractType::Unknown)
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a template variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Text,
    Number,
    Date,
    Percentage,
}

impl VariableType {
    /// Whether raw answers for this type are coerced to numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, VariableType::Number | VariableType::Percentage)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::Text => "text",
            VariableType::Number => "number",
            VariableType::Date => "date",
            VariableType::Percentage => "percentage",
        }
    }
}

/// A typed variable referenced from template markup as `{{name}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Unique key within the template; matched case-sensitively.
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
}

impl VariableDefinition {
    pub fn new(name: &str, label: &str, var_type: VariableType) -> Self {
        VariableDefinition {
            name: name.to_string(),
            label: label.to_string(),
            var_type,
        }
    }
}

/// A reusable block of clause text, written in the same markup as template bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseDefinition {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// A contract template: markup body, typed variables and default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub contract_type: ContractType,
    /// Display name; also used as the rendered document title.
    pub name: String,
    pub body_markup: String,
    pub variables: Vec<VariableDefinition>,
    #[serde(default)]
    pub default_values: Bindings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clauses: Vec<ClauseDefinition>,
}

impl Template {
    /// Look up a declared variable by exact name.
    pub fn variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Display label for a variable, falling back to the raw key.
    pub fn label_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.variable(name).map(|v| v.label.as_str()).unwrap_or(name)
    }

    /// Parse the body markup into a node tree.
    pub fn document(&self) -> Document {
        parse(&self.body_markup)
    }

    /// Title for a contract built from this template for `client_name`.
    pub fn contract_title(&self, client_name: &str) -> String {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, client_name)
        }
    }
}
