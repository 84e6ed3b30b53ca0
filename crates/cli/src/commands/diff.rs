use std::path::Path;

use quire_core::bindings::stringify;
use quire_core::{Bindings, ContractType, TemplateRegistry};
use quire_eval::diff_bindings;

use crate::{print_json, read_json, OutputFormat};

pub(crate) fn cmd_diff(
    registry: &TemplateRegistry,
    contract_type: ContractType,
    before_path: &Path,
    after_path: &Path,
    output: OutputFormat,
    quiet: bool,
) {
    let before: Bindings = read_json(before_path, output, quiet);
    let after: Bindings = read_json(after_path, output, quiet);
    let variables = registry
        .template(contract_type)
        .map(|t| t.variables.as_slice())
        .unwrap_or(&[]);
    let changes = diff_bindings(&before, &after, variables);

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&changes, output, quiet),
        OutputFormat::Text => {
            if changes.is_empty() {
                println!("no changes");
                return;
            }
            println!("{} change(s)", changes.len());
            for change in &changes {
                println!(
                    "  {} ({}): {} -> {}",
                    change.label,
                    change.field,
                    stringify(&change.before),
                    stringify(&change.after)
                );
            }
        }
    }
}
