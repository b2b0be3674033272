//! # sxg CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sxg_cli::catalog::{run_describe, run_types, DescribeArgs};
use sxg_cli::validate::{run_validate, ValidateArgs};

/// SXG: structural validation for Sui gateway RPC payloads.
#[derive(Parser, Debug)]
#[command(name = "sxg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML validator configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum value nesting depth to descend into (overrides config and SXG_MAX_DEPTH).
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON or YAML payload against a gateway type.
    Validate(ValidateArgs),

    /// List gateway type names.
    Types,

    /// Print the shape of a gateway type.
    Describe(DescribeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("sxg CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate(args) => sxg_cli::resolve_config(cli.config.as_deref(), cli.max_depth)
            .and_then(|config| {
                tracing::debug!(max_depth = ?config.max_depth, "resolved validator config");
                run_validate(&args, &config)
            }),
        Commands::Types => run_types(),
        Commands::Describe(args) => run_describe(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
