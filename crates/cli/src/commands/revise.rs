use std::io;
use std::process;

use quire_core::TemplateRegistry;
use quire_eval::{RevisionError, RevisionSession};
use quire_storage::JsonDirStore;
use serde_json::json;
use time::OffsetDateTime;

use super::new::prompt_writer;
use crate::prompt::run_flow;
use crate::{print_json, report_error, runtime, OutputFormat};

pub(crate) fn cmd_revise(
    registry: &TemplateRegistry,
    store: &JsonDirStore,
    id: &str,
    actor: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let rt = runtime(output, quiet);
    let mut session = match rt.block_on(RevisionSession::open(store, registry, id)) {
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

    let changes = session.changes();
    let saved = match rt.block_on(session.save(store, actor, OffsetDateTime::now_utc())) {
        Ok(saved) => saved,
        Err(e) if e.is_conflict() => {
            let msg = format!(
                "contract {} was saved by another session since it was opened; reopen it and try again",
                id
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        Err(RevisionError::Storage(e)) => {
            report_error(&format!("could not save contract {}: {}", id, e), output, quiet);
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
    match (output, saved) {
        (OutputFormat::Json, saved) => print_json(
            &json!({
                "id": id,
                "saved": saved.is_some(),
                "version": saved.as_ref().map(|c| c.version),
                "changes": changes,
            }),
            output,
            quiet,
        ),
        (OutputFormat::Text, None) => println!("no changes; {} left at version {}", id, session.original().version),
        (OutputFormat::Text, Some(contract)) => println!(
            "saved {} version {} ({} change(s))",
            contract.id,
            contract.version,
            changes.len()
        ),
    }
}
