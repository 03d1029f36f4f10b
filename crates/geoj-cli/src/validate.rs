//! # Validate Subcommand
//!
//! Decodes each file and runs full validation on it. A file passes only if
//! it decodes and yields no diagnostics.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use geoj_model::loads;
use geoj_schema::Diagnostic;
use serde::Serialize;

/// Arguments for the `geoj validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// GeoJSON documents to validate.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Valid,
    Invalid,
    Undecodable,
}

/// Validation result for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: Status,
    /// Decoded type name, when decoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    /// Decode error, when decoding failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.status == Status::Valid
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every file is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let reports = args
        .paths
        .iter()
        .map(|path| validate_file(path))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", render_report(report));
        }
        let passed = reports.iter().filter(|r| r.passed()).count();
        println!("{passed}/{} passed", reports.len());
    }

    Ok(if reports.iter().all(FileReport::passed) { 0 } else { 1 })
}

/// Decode and validate one file.
///
/// Only an unreadable file is an error; decode failures are reported.
pub fn validate_file(path: &Path) -> Result<FileReport> {
    let text = crate::read_input(path)?;
    let report = match loads(&text) {
        Ok(obj) => {
            let diagnostics = obj.validate().into_inner();
            tracing::debug!(path = %path.display(), kind = obj.type_name(), count = diagnostics.len(), "validated");
            FileReport {
                path: path.to_path_buf(),
                status: if diagnostics.is_empty() { Status::Valid } else { Status::Invalid },
                kind: Some(obj.type_name()),
                error: None,
                diagnostics,
            }
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "decode failed");
            FileReport {
                path: path.to_path_buf(),
                status: Status::Undecodable,
                kind: None,
                error: Some(err.to_string()),
                diagnostics: Vec::new(),
            }
        }
    };
    Ok(report)
}

/// Text lines for one report.
pub fn render_report(report: &FileReport) -> String {
    let path = report.path.display();
    match report.status {
        Status::Valid => format!("OK: {path} ({})\n", report.kind.unwrap_or("?")),
        Status::Undecodable => {
            format!("FAIL: {path}: {}\n", report.error.as_deref().unwrap_or("decode error"))
        }
        Status::Invalid => {
            let mut out = format!(
                "FAIL: {path} ({}): {} problem(s)\n",
                report.kind.unwrap_or("?"),
                report.diagnostics.len()
            );
            for diagnostic in &report.diagnostics {
                out.push_str(&format!("  {diagnostic}\n"));
            }
            out
        }
    }
}
