//! # CLI Configuration
//!
//! Optional YAML file given with `--config`:
//!
//! ```yaml
//! dump:
//!   pretty: true
//!   indent: 4
//! ```
//!
//! Missing keys take their defaults. Command-line flags override file values.

use std::path::Path;

use anyhow::{Context, Result};
use geoj_model::DumpOptions;
use serde::Deserialize;

/// Settings read from the `--config` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Rendering options for `fmt`.
    pub dump: DumpOptions,
}

impl CliConfig {
    /// Load from `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = crate::read_input(path)?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
