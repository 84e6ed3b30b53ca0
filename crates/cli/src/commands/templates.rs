use quire_core::TemplateRegistry;
use serde_json::json;

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_templates(registry: &TemplateRegistry, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let templates: Vec<_> = registry
                .entries()
                .map(|entry| {
                    json!({
                        "contract_type": entry.template.contract_type,
                        "id": entry.template.id,
                        "name": entry.template.name,
                        "variables": entry.template.variables,
                        "question_count": entry.questions.len(),
                    })
                })
                .collect();
            print_json(&templates, output, quiet);
        }
        OutputFormat::Text => {
            for entry in registry.entries() {
                let template = &entry.template;
                println!(
                    "{} ({}): {}, {} variable(s), {} question(s)",
                    template.contract_type,
                    template.id,
                    template.name,
                    template.variables.len(),
                    entry.questions.len()
                );
                for var in &template.variables {
                    println!("  {:<24} {:<10} {}", var.name, var.var_type.as_str(), var.label);
                }
            }
        }
    }
}
