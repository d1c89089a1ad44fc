//! tenorx CLI - Futures Tenor Expansion and Delta Summary
//!
//! Operational entry point for expanding compressed-tenor positions into
//! per-contract-month deltas.
//!
//! # Commands
//!
//! - `tenorx expand <INPUT>` - Write the expanded positions table
//! - `tenorx summary <INPUT>` - Print or write the tenor × product matrix
//! - `tenorx run <INPUT>` - Write both tables and the JSON audit
//! - `tenorx inspect <TENOR>...` - Show how tenors classify and expand
//! - `tenorx check` - Validate the configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the adapter, infra
//! and core crates behind a single binary.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use infra_config::{AppConfig, DEFAULT_CONFIG_FILE};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

pub use error::{CliError, Result};

use commands::summary::SummaryFormat;

/// Futures tenor expansion CLI
#[derive(Parser)]
#[command(name = "tenorx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand positions into per-contract-month deltas
    Expand {
        /// Position CSV (Qty,Tenor,Product,Strategy)
        input: PathBuf,

        /// Output CSV (defaults to the configured expanded file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Aggregate expanded deltas into the tenor × product matrix
    Summary {
        /// Position CSV (Qty,Tenor,Product,Strategy)
        input: PathBuf,

        /// Write the matrix as CSV to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stdout format
        #[arg(short, long, value_enum, default_value_t = SummaryFormat::Table)]
        format: SummaryFormat,
    },

    /// Expand, aggregate and write every output plus the audit
    Run {
        /// Position CSV (Qty,Tenor,Product,Strategy)
        input: PathBuf,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show classification and expansion of individual tenors
    Inspect {
        /// Tenor codes, e.g. H6 Q2-2026 J6/Q2-26
        #[arg(required = true)]
        tenors: Vec<String>,

        /// Quantity to expand
        #[arg(short, long, default_value_t = 1.0, allow_hyphen_values = true)]
        qty: f64,
    },

    /// Validate the configuration and print the mapping horizon
    Check,
}

fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: &Path) -> Result<AppConfig> {
    Ok(AppConfig::load_with_env_and_validate(path)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config);
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.to_lowercase())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(cli.verbose, &log_level);

    let config = config?;
    debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Expand { input, output } => {
            commands::expand::run(&config, &input, output.as_deref())?
        }
        Commands::Summary {
            input,
            output,
            format,
        } => commands::summary::run(&config, &input, output.as_deref(), format)?,
        Commands::Run { input, output_dir } => {
            commands::run::run(&config, &input, output_dir.as_deref())?
        }
        Commands::Inspect { tenors, qty } => commands::inspect::run(&config, &tenors, qty)?,
        Commands::Check => commands::check::run(&config, &cli.config)?,
    }

    Ok(())
}
