//! Code-defined templates and question flows.

mod content_creation;
mod photography;
mod web_development;

use serde_json::Value;

use crate::model::Bindings;
use crate::registry::TemplateEntry;

/// Studio name used as the provider party in every built-in template.
pub const DEFAULT_PROVIDER_NAME: &str = "Northlight Studio";

pub(crate) fn entries() -> Vec<TemplateEntry> {
    vec![
        photography::entry(),
        content_creation::entry(),
        web_development::entry(),
    ]
}

fn defaults(value: Value) -> Bindings {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Bindings::new(),
    }
}
