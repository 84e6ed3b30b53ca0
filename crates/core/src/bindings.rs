//! Bindings helpers: layered resolution, truthiness, stringification and
//! answer coercion.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::model::{Bindings, VariableType};

static NULL: Value = Value::Null;

/// Merge an ordered list of partial maps. Later layers win key by key.
pub fn resolve_layers(layers: &[&Bindings]) -> Bindings {
    let mut resolved = Bindings::new();
    for layer in layers {
        for (key, value) in layer.iter() {
            resolved.insert(key.clone(), value.clone());
        }
    }
    resolved
}

/// The value bound to `key`, or `null` when the key was never bound.
pub fn lookup<'a>(bindings: &'a Bindings, key: &str) -> &'a Value {
    bindings.get(key).unwrap_or(&NULL)
}

/// Truthiness used by `{{#if}}` blocks and `truthy` conditions.
///
/// `true`; numbers greater than zero; non-empty strings other than `off`,
/// `false` or `no` (case-insensitive); arrays and objects. Everything else,
/// including `null`, is falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f > 0.0),
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty()
                && !s.eq_ignore_ascii_case("off")
                && !s.eq_ignore_ascii_case("false")
                && !s.eq_ignore_ascii_case("no")
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form used for change detection and plain display. `null` is empty.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Whether two values have the same string form.
pub fn same_string_form(a: &Value, b: &Value) -> bool {
    stringify(a) == stringify(b)
}

/// Parse a numeric string into a JSON number. Integers stay integers.
pub fn parse_number(raw: &str) -> Option<Value> {
    let d = Decimal::from_str(raw.trim()).ok()?;
    if d.fract().is_zero() {
        if let Some(i) = d.trunc().to_i64() {
            return Some(Value::from(i));
        }
    }
    d.to_f64().and_then(Number::from_f64).map(Value::Number)
}

/// Coerce a raw answer according to the variable type.
///
/// Number and percentage answers that are non-empty and numeric become JSON
/// numbers (a trailing `%` is accepted for percentages). Anything else is kept
/// as the entered string.
pub fn coerce_answer(raw: &str, var_type: Option<VariableType>) -> Value {
    let trimmed = raw.trim();
    match var_type {
        Some(t) if t.is_numeric() && !trimmed.is_empty() => {
            let numeric = match t {
                VariableType::Percentage => trimmed.trim_end_matches('%').trim_end(),
                _ => trimmed,
            };
            parse_number(numeric).unwrap_or_else(|| Value::String(raw.to_string()))
        }
        _ => Value::String(raw.to_string()),
    }
}
