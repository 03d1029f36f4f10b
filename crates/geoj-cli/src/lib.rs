//! # geoj-cli — GeoJSON Command-Line Interface
//!
//! Thin handlers over `geoj-model`. Each subcommand module exposes its clap
//! arguments and a `run_*` function returning the process exit code.
//!
//! ## Subcommands
//!
//! - `validate`: decode and validate documents, report diagnostics
//! - `fmt`: re-render a document in canonical member order
//! - `types`: list the registered concrete types
//!
//! ## Exit Codes
//!
//! - `0`: success, every document valid
//! - `1`: a document is invalid or could not be decoded
//! - `2`: operational error (unreadable file, bad config)
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to the library crates; no GeoJSON rules live here.

pub mod config;
pub mod fmt;
pub mod types;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
