use quire_core::bindings::stringify;
use quire_core::{ContractType, TemplateRegistry};

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_questions(
    registry: &TemplateRegistry,
    contract_type: ContractType,
    output: OutputFormat,
    quiet: bool,
) {
    if quiet {
        return;
    }
    let questions = registry.questions(contract_type);
    match output {
        OutputFormat::Json => print_json(&questions, output, quiet),
        OutputFormat::Text => {
            for (index, item) in questions.iter().enumerate() {
                let mut line = format!("{:>2}. {}: {}", index + 1, item.key, item.question);
                if item.required {
                    line.push_str(" [required]");
                }
                if let Some(options) = &item.enum_options {
                    line.push_str(&format!(" [{}]", options.join("/")));
                }
                if let Some(default) = &item.default {
                    line.push_str(&format!(" (default: {})", stringify(default)));
                }
                println!("{}", line);
                if let Some(condition) = &item.condition {
                    let condition = serde_json::to_string(condition).unwrap_or_default();
                    println!("    when {}", condition);
                }
            }
        }
    }
}
