//! promptsmith CLI — the main entry point.
//!
//! Commands:
//! - `select`   — Choose techniques for a piece of text
//! - `catalog`  — List, validate or print the technique catalog
//! - `config`   — Show, locate or validate configuration
//! - `init`     — Write default config and catalog files
//! - `doctor`   — Diagnose the installation

use clap::{Parser, Subcommand};
use promptsmith_config::AppConfig;
use promptsmith_core::ComplexityLevel;

mod commands;

#[derive(Parser)]
#[command(
    name = "promptsmith",
    about = "promptsmith — prompt-engineering technique selection",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Select techniques for a piece of text
    Select {
        /// The user text to enhance
        text: String,

        /// Classified intent (e.g. problem_solving)
        #[arg(short, long)]
        intent: Option<String>,

        /// Classified complexity level
        #[arg(short, long)]
        complexity: Option<ComplexityLevel>,

        /// Explicit complexity score in [0, 1]; overrides text estimation
        #[arg(short, long)]
        score: Option<f64>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the technique catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Write default config and catalog files
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Diagnose the installation
    Doctor,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List techniques and their conditions
    List,
    /// Validate the catalog
    Validate,
    /// Print the resolved catalog as TOML
    Show,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging is configured from the file when it parses; otherwise defaults.
    let logging = AppConfig::load().map(|c| c.logging).unwrap_or_default();
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Select {
            text,
            intent,
            complexity,
            score,
            json,
        } => commands::select::run(commands::select::SelectArgs {
            text,
            intent,
            complexity,
            score,
            json,
        })?,
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list()?,
            CatalogAction::Validate => commands::catalog::validate()?,
            CatalogAction::Show => commands::catalog::show()?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
            ConfigAction::Validate => commands::config_cmd::validate()?,
        },
        Commands::Init { force } => commands::init::run(force)?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
