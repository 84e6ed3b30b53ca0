mod commands;
mod config;
mod logging;
mod prompt;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use quire_core::{ContractType, TemplateRegistry};
use quire_eval::RenderMode;
use quire_storage::JsonDirStore;
use serde::de::DeserializeOwned;

use crate::config::QuireConfig;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Quire contract authoring toolchain.
#[derive(Parser)]
#[command(
    name = "quire",
    version,
    about = "Contract templates, question flows and versioned revisions"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to quire.toml (default: ./quire.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered templates and their variables
    Templates,

    /// Check templates and question flows for authoring mistakes
    Validate {
        /// Registry JSON file to check instead of the configured registry
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Render a contract JSON document to HTML
    Render {
        /// Path to the contract JSON file
        contract: PathBuf,
        /// Rendering mode (interactive or pdf); defaults to the configured mode
        #[arg(long)]
        mode: Option<RenderMode>,
        /// Wrap the body in a standalone HTML page
        #[arg(long)]
        page: bool,
    },

    /// Print the question flow for a contract type
    Questions {
        /// Contract type (photography, content_creation, web_development)
        contract_type: String,
    },

    /// Author a new contract interactively and store it as a draft
    New {
        /// Contract type (photography, content_creation, web_development)
        contract_type: String,
        /// Id for the new contract
        #[arg(long)]
        id: String,
    },

    /// Revise a stored contract interactively and save the next version
    Revise {
        /// Id of the stored contract
        id: String,
    },

    /// Show a stored contract
    Show {
        /// Id of the stored contract
        id: String,
    },

    /// List stored contracts
    List,

    /// Compare two bindings JSON files field by field
    Diff {
        /// Bindings before the change
        before: PathBuf,
        /// Bindings after the change
        after: PathBuf,
        /// Contract type whose variable labels name the fields
        #[arg(long = "type")]
        contract_type: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e, cli.output, cli.quiet);
            process::exit(1);
        }
    };
    logging::init_logging(&config.logging.filter, cli.verbose);
    tracing::debug!(command = command_name(&cli.command), "starting");

    let output = cli.output;
    let quiet = cli.quiet;
    match cli.command {
        Commands::Templates => {
            let registry = load_registry(&config, None, output, quiet);
            commands::templates::cmd_templates(&registry, output, quiet);
        }
        Commands::Validate { registry } => {
            let registry = load_registry(&config, registry.as_deref(), output, quiet);
            commands::validate::cmd_validate(&registry, output, quiet);
        }
        Commands::Render {
            contract,
            mode,
            page,
        } => {
            let registry = load_registry(&config, None, output, quiet);
            let mode = mode.unwrap_or(config.render.default_mode);
            commands::render::cmd_render(&registry, &contract, mode, page, output, quiet);
        }
        Commands::Questions { contract_type } => {
            let registry = load_registry(&config, None, output, quiet);
            let ct = parse_contract_type(&contract_type, output, quiet);
            commands::questions::cmd_questions(&registry, ct, output, quiet);
        }
        Commands::New { contract_type, id } => {
            let registry = load_registry(&config, None, output, quiet);
            let ct = parse_contract_type(&contract_type, output, quiet);
            let store = open_store(&config);
            commands::new::cmd_new(
                &registry,
                &store,
                ct,
                &id,
                &config.session.actor,
                output,
                quiet,
            );
        }
        Commands::Revise { id } => {
            let registry = load_registry(&config, None, output, quiet);
            let store = open_store(&config);
            commands::revise::cmd_revise(
                &registry,
                &store,
                &id,
                &config.session.actor,
                output,
                quiet,
            );
        }
        Commands::Show { id } => {
            let store = open_store(&config);
            commands::show::cmd_show(&store, &id, output, quiet);
        }
        Commands::List => {
            let store = open_store(&config);
            commands::show::cmd_list(&store, output, quiet);
        }
        Commands::Diff {
            before,
            after,
            contract_type,
        } => {
            let registry = load_registry(&config, None, output, quiet);
            let ct = parse_contract_type(&contract_type, output, quiet);
            commands::diff::cmd_diff(&registry, ct, &before, &after, output, quiet);
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Templates => "templates",
        Commands::Validate { .. } => "validate",
        Commands::Render { .. } => "render",
        Commands::Questions { .. } => "questions",
        Commands::New { .. } => "new",
        Commands::Revise { .. } => "revise",
        Commands::Show { .. } => "show",
        Commands::List => "list",
        Commands::Diff { .. } => "diff",
    }
}

/// The registry at `override_path`, else the configured one, else the
/// built-in templates.
fn load_registry(
    config: &QuireConfig,
    override_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> TemplateRegistry {
    let Some(path) = override_path.or(config.registry.templates.as_deref()) else {
        return TemplateRegistry::builtin();
    };
    match TemplateRegistry::load_json(path) {
        Ok(registry) => {
            tracing::debug!(path = %path.display(), templates = registry.len(), "loaded registry");
            registry
        }
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}

fn open_store(config: &QuireConfig) -> JsonDirStore {
    JsonDirStore::new(config.store.dir.clone())
}

fn parse_contract_type(name: &str, output: OutputFormat, quiet: bool) -> ContractType {
    match ContractType::parse(name) {
        ContractType::Unknown => {
            let known: Vec<&str> = ContractType::KNOWN.iter().map(|ct| ct.as_str()).collect();
            let msg = format!(
                "unknown contract type '{}' (expected one of: {})",
                name,
                known.join(", ")
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        ct => ct,
    }
}

/// Read and parse a JSON file, exiting with a report on failure.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, output: OutputFormat, quiet: bool) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// A current-thread runtime for the store calls of one command.
pub(crate) fn runtime(output: OutputFormat, quiet: bool) -> tokio::runtime::Runtime {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            report_error(&format!("failed to start async runtime: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn print_json(value: &impl serde::Serialize, output: OutputFormat, quiet: bool) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            report_error(&format!("error serializing output: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
