use std::process;

use quire_core::validate::has_errors;
use quire_core::{validate_questions, validate_template, Severity, TemplateRegistry};
use serde_json::json;

use crate::{print_json, OutputFormat};

pub(crate) fn cmd_validate(registry: &TemplateRegistry, output: OutputFormat, quiet: bool) {
    let mut reports = Vec::new();
    let mut failed = false;
    for entry in registry.entries() {
        let mut issues = validate_template(&entry.template);
        issues.extend(validate_questions(&entry.template, &entry.questions));
        failed |= has_errors(&issues);
        reports.push((entry.template.id.clone(), issues));
    }

    if !quiet {
        match output {
            OutputFormat::Json => {
                let templates: Vec<_> = reports
                    .iter()
                    .map(|(id, issues)| json!({ "id": id, "issues": issues }))
                    .collect();
                print_json(&json!({ "valid": !failed, "templates": templates }), output, quiet);
            }
            OutputFormat::Text => {
                for (id, issues) in &reports {
                    if issues.is_empty() {
                        println!("{}: ok", id);
                        continue;
                    }
                    println!("{}: {} issue(s)", id, issues.len());
                    for issue in issues {
                        let severity = match issue.severity {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                        };
                        match issue.line {
                            Some(line) => println!("  {} (line {}): {}", severity, line, issue.message),
                            None => println!("  {}: {}", severity, issue.message),
                        }
                    }
                }
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
