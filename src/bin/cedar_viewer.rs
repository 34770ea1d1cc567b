//! Cedar Viewer command line interface
//!
//! Inspect a Cedar schema and entity set from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Overview of the bundled sample data
//! cedar-viewer --sample
//!
//! # Entities of one type, namespace prefixes hidden
//! cedar-viewer --schema schema.cedarschema --entities entities.json --hide-namespace type User
//!
//! # Hierarchy as JSON, walked from one entity
//! cedar-viewer --entities entities.json -o json hierarchy --from 'App::Group::"admins"'
//!
//! # Interactive session
//! cedar-viewer --sample repl
//! ```

use anyhow::{anyhow, Context, Result};
use cedar_viewer::loader::{read_schema, read_entities, SampleData};
use cedar_viewer::repl::{self, ReplSession};
use cedar_viewer::{OutputFormat, TerminalRenderer, ViewerConfig};
use cedar_core::EntityUid;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer_projection::{project, project_hierarchy_from, AppState, Frame, View, Viewer};

#[derive(Parser)]
#[command(name = "cedar-viewer")]
#[command(version)]
#[command(about = "Browse Cedar schemas and entity sets: overview, by type, hierarchy and schema views")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Schema file (.cedarschema text, or .json)
    #[arg(long, global = true, env = "CEDAR_VIEWER_SCHEMA")]
    schema: Option<PathBuf>,

    /// Entities JSON file
    #[arg(long, global = true, env = "CEDAR_VIEWER_ENTITIES")]
    entities: Option<PathBuf>,

    /// Load the sample data (explicit --schema / --entities still win)
    #[arg(long, global = true)]
    sample: bool,

    /// Hide namespace prefixes in displayed names
    #[arg(long, global = true)]
    hide_namespace: bool,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals and entity counts per type
    Overview,

    /// List entity types
    Types {
        /// Case-insensitive search term
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show the entities of one type
    Type {
        /// Full or unprefixed type name
        name: String,
    },

    /// Parent/child tree
    Hierarchy {
        /// Walk from this entity (Type::id) instead of the roots
        #[arg(long)]
        from: Option<String>,
    },

    /// Entity types, actions and raw schema source
    Schema,

    /// Interactive session
    Repl,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match ViewerConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fail(cli.format.unwrap_or_default(), &e),
    };
    let format = cli.format.unwrap_or(config.output);

    match run(cli, &config, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(format, &e),
    }
}

fn fail(format: OutputFormat, error: &anyhow::Error) -> ExitCode {
    let mut renderer = TerminalRenderer::stdout(format);
    if renderer.write_error(&format!("{error:#}"), None).is_err() {
        eprintln!("error: {error:#}");
    }
    ExitCode::FAILURE
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn run(cli: Cli, config: &ViewerConfig, format: OutputFormat) -> Result<()> {
    let state = initial_state(&cli, config)?;

    let frame = match cli.command {
        None => project(&state),
        Some(Commands::Repl) => return cmd_repl(state, config, format),
        Some(Commands::Hierarchy { from: Some(key) }) => cmd_hierarchy_from(&state, &key)?,
        Some(command) => project(&apply(state, command)),
    };

    TerminalRenderer::stdout(format)
        .write_frame(&frame)
        .context("Failed to write output")
}

/// State after loading everything the flags and config ask for.
fn initial_state(cli: &Cli, config: &ViewerConfig) -> Result<AppState> {
    let mut state = AppState::new().with_view(config.default_view);
    state.set_show_namespace_prefix(!(cli.hide_namespace || config.hide_namespace_prefix));

    if cli.sample {
        SampleData::load(config.sample_dir.as_deref())?.apply(&mut state);
    }
    if let Some(path) = &cli.schema {
        state.replace_schema(read_schema(path)?);
    }
    if let Some(path) = &cli.entities {
        state.replace_entities(read_entities(path)?);
    }
    Ok(state)
}

/// Move the state to what a one-shot subcommand shows.
fn apply(mut state: AppState, command: Commands) -> AppState {
    match command {
        Commands::Overview => state.switch_view(View::Overview),
        Commands::Types { filter } => {
            state.switch_view(View::ByType);
            if let Some(filter) = filter {
                state.set_type_filter(filter);
            }
        }
        Commands::Type { name } => {
            let entity_type = state.find_entity_type(&name).unwrap_or(&name).to_string();
            state.jump_to_entity_type(entity_type);
        }
        Commands::Hierarchy { .. } => state.switch_view(View::Hierarchy),
        Commands::Schema => state.switch_view(View::Schema),
        Commands::Repl => {}
    }
    state
}

fn cmd_hierarchy_from(state: &AppState, key: &str) -> Result<Frame> {
    let uid = EntityUid::parse_key(key).ok_or_else(|| anyhow!("Expected Type::id, got '{key}'"))?;
    Ok(project_hierarchy_from(state, &uid))
}

fn cmd_repl(state: AppState, config: &ViewerConfig, format: OutputFormat) -> Result<()> {
    let viewer = Viewer::with_state(state, TerminalRenderer::stdout(format));
    let mut session = ReplSession::new(viewer, config.sample_dir.clone());
    repl::run(&mut session)
}
