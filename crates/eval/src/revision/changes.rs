//! Field-level change tracking.

use std::collections::{BTreeMap, BTreeSet};

use quire_core::bindings::{lookup, same_string_form};
use quire_core::{Bindings, ChangeRecord, VariableDefinition};
use serde_json::Value;

/// Change records for one session, at most one per field.
///
/// `before` is always the value the field had when the session started, so
/// editing a field back to that value drops its record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    records: BTreeMap<String, ChangeRecord>,
}

impl ChangeSet {
    pub fn new() -> Self {
        ChangeSet::default()
    }

    pub fn record(&mut self, field: &str, label: &str, before: Value, after: Value) {
        if same_string_form(&before, &after) {
            self.records.remove(field);
            return;
        }
        self.records.insert(
            field.to_string(),
            ChangeRecord {
                field: field.to_string(),
                label: label.to_string(),
                before,
                after,
            },
        );
    }

    pub fn get(&self, field: &str) -> Option<&ChangeRecord> {
        self.records.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.records.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.values()
    }

    pub fn to_vec(&self) -> Vec<ChangeRecord> {
        self.records.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

fn label_for<'a>(variables: &'a [VariableDefinition], field: &'a str) -> &'a str {
    variables
        .iter()
        .find(|v| v.name == field)
        .map(|v| v.label.as_str())
        .unwrap_or(field)
}

/// Change records between two arbitrary bindings maps, ordered by field.
///
/// A key missing on one side compares as `null`, whose string form is empty.
pub fn diff_bindings(
    before: &Bindings,
    after: &Bindings,
    variables: &[VariableDefinition],
) -> Vec<ChangeRecord> {
    let fields: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
    let mut changes = ChangeSet::new();
    for field in fields {
        changes.record(
            field,
            label_for(variables, field),
            lookup(before, field).clone(),
            lookup(after, field).clone(),
        );
    }
    changes.to_vec()
}
