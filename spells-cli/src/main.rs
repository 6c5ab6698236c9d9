//! Spells - an interactive catalog of tabletop spells
//!
//! Loads spell lists into memory and answers name, filter and sort queries
//! from standard input.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use spells_core::{config::SourceConfig, Catalog, SortOrder};

mod command;
mod render;
mod shell;

use render::RenderOptions;
use shell::Shell;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "spells",
    about = "Interactive catalog of tabletop spells loaded from delimited spell lists",
    version
)]
struct Cli {
    /// Configuration file naming the default spell lists
    #[clap(long)]
    config: Option<PathBuf>,

    /// Set log level
    #[clap(long, default_value = "warn")]
    log_level: LogLevel,

    /// Initial sort order (name or level)
    #[clap(long, default_value = "level")]
    sort: SortOrder,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    /// Disable coloured spell names
    #[clap(long)]
    no_color: bool,

    /// Additional spell list to load at start-up (repeatable)
    #[clap(long = "load", value_name = "PATH")]
    load: Vec<PathBuf>,
}

fn initialize_tracing(log_level: &LogLevel) {
    // RUST_LOG directives are layered on top of the base level
    let mut filter = EnvFilter::new(log_level.to_filter_directive());
    if let Ok(extra) = std::env::var("RUST_LOG") {
        for directive in extra.split(',').filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the start-up catalog from configuration and `--load` paths
fn build_catalog(cli: &Cli) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    match SourceConfig::discover(cli.config.clone())? {
        Some(path) => {
            let config = SourceConfig::load(&path)?;
            catalog.set_defaults(config.sources);
            if let Err(err) = catalog.ingest_defaults() {
                error!("Failed to load default spell lists: {}", err);
            }
        }
        None => {
            debug!("No configuration found, using built-in defaults");
            catalog.set_defaults(SourceConfig::builtin().sources);
        }
    }

    for path in &cli.load {
        if let Err(err) = catalog.ingest(path) {
            warn!("{}", err);
        }
    }

    info!("Catalog ready with {} spells", catalog.len());
    Ok(catalog)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let catalog = build_catalog(&cli)?;

    let interactive = io::stdin().is_terminal();
    let render = RenderOptions {
        color: !cli.no_color && io::stdout().is_terminal(),
        json: cli.json,
    };

    if interactive {
        println!("Welcome to Spells! Type 'help' for commands.");
    }

    let mut shell = Shell::new(catalog, io::stdout().lock())
        .with_sort(cli.sort)
        .with_render(render);
    if interactive {
        shell = shell.with_prompt("spells> ");
    }

    shell.run(io::stdin().lock())
}
