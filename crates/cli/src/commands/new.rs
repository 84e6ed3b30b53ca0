use std::io::{self, Write};
use std::process;

use quire_core::{ContractType, TemplateRegistry};
use quire_eval::CreateSession;
use quire_storage::JsonDirStore;
use time::OffsetDateTime;

use crate::prompt::run_flow;
use crate::{print_json, report_error, runtime, OutputFormat};

/// Prompts go to stdout in text mode and to stderr in JSON mode, so JSON
/// output stays parseable.
pub(crate) fn prompt_writer(output: OutputFormat) -> Box<dyn Write> {
    match output {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    }
}

pub(crate) fn cmd_new(
    registry: &TemplateRegistry,
    store: &JsonDirStore,
    contract_type: ContractType,
    id: &str,
    actor: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let mut session = match CreateSession::new(registry, contract_type) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let mut out = prompt_writer(output);
    if let Err(e) = run_flow(session.flow_mut(), &mut io::stdin().lock(), &mut out) {
        report_error(&format!("error reading answers: {}", e), output, quiet);
        process::exit(1);
    }

    let rt = runtime(output, quiet);
    let contract = match rt.block_on(session.save(store, id, actor, OffsetDateTime::now_utc())) {
        Ok(c) => c,
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
        OutputFormat::Text => println!(
            "created {} \"{}\" (version {})",
            contract.id, contract.title, contract.version
        ),
    }
}
