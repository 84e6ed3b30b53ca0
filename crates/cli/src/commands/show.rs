use std::process;

use quire_core::bindings::stringify;
use quire_storage::{ContractStore, JsonDirStore};

use crate::{print_json, report_error, runtime, OutputFormat};

pub(crate) fn cmd_show(store: &JsonDirStore, id: &str, output: OutputFormat, quiet: bool) {
    let rt = runtime(output, quiet);
    let contract = match rt.block_on(store.get_contract(id)) {
        Ok(Some(c)) => c,
        Ok(None) => {
            report_error(&format!("contract not found: {}", id), output, quiet);
            process::exit(1);
        }
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&contract, output, quiet),
        OutputFormat::Text => {
            println!("{}", contract.title);
            println!("  id:       {}", contract.id);
            println!("  type:     {}", contract.contract_type);
            println!("  status:   {}", contract.status.as_str());
            println!("  version:  {}", contract.version);
            println!("  client:   {} <{}>", contract.client_name, contract.client_email);
            println!("  updated:  {}", contract.updated_at);
            println!("Variables:");
            for (key, value) in &contract.variables {
                println!("  {} = {}", key, stringify(value));
            }
            if !contract.history.is_empty() {
                println!("History:");
                for version in &contract.history {
                    println!(
                        "  v{}  {}  replaced by {}",
                        version.version, version.created_at, version.modified_by
                    );
                }
            }
            println!("Audit trail:");
            for event in &contract.audit_trail {
                println!("  {}  {:?}  {}  {}", event.at, event.kind, event.actor, event.details);
            }
        }
    }
}

pub(crate) fn cmd_list(store: &JsonDirStore, output: OutputFormat, quiet: bool) {
    let rt = runtime(output, quiet);
    let summaries = match rt.block_on(store.list_contracts()) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&summaries, output, quiet),
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("no contracts");
            }
            for s in &summaries {
                println!(
                    "{:<20} v{:<3} {:<9} {:<17} {}",
                    s.id,
                    s.version,
                    s.status.as_str(),
                    s.contract_type.as_str(),
                    s.title
                );
            }
        }
    }
}
