//! # geoj CLI entry point
//!
//! Parses command-line arguments, loads the optional config file and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geoj_cli::config::CliConfig;
use geoj_cli::fmt::{run_fmt, FmtArgs};
use geoj_cli::types::run_types;
use geoj_cli::validate::{run_validate, ValidateArgs};

/// GeoJSON toolkit: validate documents, normalize their layout and inspect
/// the declared types.
#[derive(Parser, Debug)]
#[command(name = "geoj", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode and validate GeoJSON documents.
    Validate(ValidateArgs),

    /// Re-render a document with members in declaration order.
    Fmt(FmtArgs),

    /// List the registered concrete types.
    Types,
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

    tracing::debug!("geoj CLI starting");

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Fmt(args) => run_fmt(&args, &config),
        Commands::Types => run_types(),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
