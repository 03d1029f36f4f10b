//! # Fmt Subcommand
//!
//! Decodes a document and renders it back with members in declaration
//! order. Unknown members are dropped. The document is not required to be
//! valid; a warning is logged when it is not.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use geoj_model::{dumps, loads, CodecError, DumpOptions};

use crate::config::CliConfig;

/// Arguments for the `geoj fmt` subcommand.
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// GeoJSON document to render.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Multi-line output.
    #[arg(long)]
    pub pretty: bool,

    /// Spaces per nesting level for pretty output.
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,
}

impl FmtArgs {
    /// Rendering options: config file values overridden by flags.
    pub fn dump_options(&self, config: &CliConfig) -> DumpOptions {
        let mut options = config.dump;
        if self.pretty {
            options.pretty = true;
        }
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        options
    }
}

/// Execute the fmt subcommand.
///
/// Returns exit code: 0 on success, 1 when the document cannot be decoded.
pub fn run_fmt(args: &FmtArgs, config: &CliConfig) -> Result<u8> {
    match render(&args.path, &args.dump_options(config))? {
        Ok(text) => {
            println!("{text}");
            Ok(0)
        }
        Err(err) => {
            println!("FAIL: {}: {err}", args.path.display());
            Ok(1)
        }
    }
}

/// Decode the file at `path` and render it with `options`.
///
/// The outer error is operational (unreadable file); the inner one means
/// the text is not a decodable GeoJSON object.
pub fn render(path: &Path, options: &DumpOptions) -> Result<Result<String, CodecError>> {
    let text = crate::read_input(path)?;
    let obj = match loads(&text) {
        Ok(obj) => obj,
        Err(err) => return Ok(Err(err)),
    };
    if !obj.is_valid() {
        tracing::warn!(path = %path.display(), problems = obj.validate().len(), "rendering an invalid document");
    }
    Ok(Ok(dumps(&obj, options)?))
}
