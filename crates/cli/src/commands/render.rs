use std::path::Path;

use quire_core::{Contract, TemplateRegistry};
use quire_eval::render::{render_contract, render_page, TEMPLATE_NOT_FOUND};
use quire_eval::RenderMode;
use serde_json::json;

use crate::{print_json, read_json, OutputFormat};

pub(crate) fn cmd_render(
    registry: &TemplateRegistry,
    contract_path: &Path,
    mode: RenderMode,
    page: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let contract: Contract = read_json(contract_path, output, quiet);

    let html = match (page, registry.template(contract.contract_type)) {
        (true, Some(template)) => render_page(template, &contract, mode),
        _ => render_contract(registry, &contract, mode),
    };
    if html == TEMPLATE_NOT_FOUND && !quiet {
        eprintln!(
            "warning: no template registered for contract type '{}'",
            contract.contract_type
        );
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(
            &json!({ "id": contract.id, "mode": mode, "html": html }),
            output,
            quiet,
        ),
        OutputFormat::Text => println!("{}", html),
    }
}
