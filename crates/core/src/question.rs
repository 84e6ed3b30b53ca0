//! Question flow items and the conditions that gate them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bindings::{is_truthy, lookup, stringify};
use crate::model::Bindings;

/// A predicate over the current bindings snapshot.
///
/// Keys that were never bound evaluate as `null`, so a condition that refers
/// to a question skipped by an earlier branch is simply false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    Equals { key: String, value: Value },
    NotEquals { key: String, value: Value },
    OneOf { key: String, values: Vec<Value> },
    Truthy { key: String },
    All { conditions: Vec<Condition> },
    Any { conditions: Vec<Condition> },
    Not { condition: Box<Condition> },
}

/// Loose equality: identical JSON, or numbers with equal value, or a number
/// and a string with the same string form.
fn values_match(bound: &Value, expected: &Value) -> bool {
    if bound == expected {
        return true;
    }
    match (bound, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            stringify(bound) == stringify(expected)
        }
        _ => false,
    }
}

impl Condition {
    pub fn equals(key: &str, value: impl Into<Value>) -> Self {
        Condition::Equals {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub fn not_equals(key: &str, value: impl Into<Value>) -> Self {
        Condition::NotEquals {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub fn truthy(key: &str) -> Self {
        Condition::Truthy {
            key: key.to_string(),
        }
    }

    pub fn evaluate(&self, bindings: &Bindings) -> bool {
        match self {
            Condition::Equals { key, value } => values_match(lookup(bindings, key), value),
            Condition::NotEquals { key, value } => !values_match(lookup(bindings, key), value),
            Condition::OneOf { key, values } => {
                let bound = lookup(bindings, key);
                values.iter().any(|v| values_match(bound, v))
            }
            Condition::Truthy { key } => is_truthy(lookup(bindings, key)),
            Condition::All { conditions } => conditions.iter().all(|c| c.evaluate(bindings)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.evaluate(bindings)),
            Condition::Not { condition } => !condition.evaluate(bindings),
        }
    }
}

/// One prompt in a contract type's question flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFlowItem {
    /// Variable name this question binds.
    pub key: String,
    pub question: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl QuestionFlowItem {
    pub fn new(key: &str, question: &str) -> Self {
        QuestionFlowItem {
            key: key.to_string(),
            question: question.to_string(),
            required: false,
            enum_options: None,
            default: None,
            condition: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.enum_options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether the question applies to the given bindings snapshot.
    pub fn is_visible(&self, bindings: &Bindings) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition.evaluate(bindings))
    }

    /// Whether a raw answer is admissible: non-empty when required (unless a
    /// default can stand in) and one of the enum options when options exist.
    pub fn accepts(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            return !self.required || self.default.is_some();
        }
        match &self.enum_options {
            Some(options) => options.iter().any(|o| o == raw),
            None => true,
        }
    }
}
