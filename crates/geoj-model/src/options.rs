//! Text rendering options for [`dumps`](crate::codec::dumps).

use serde::{Deserialize, Serialize};

/// How encoded trees are rendered to text.
///
/// Deserializable so callers can take it straight from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DumpOptions {
    /// Multi-line output instead of compact.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

impl DumpOptions {
    /// Compact output, the default.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Pretty output with the default indent.
    pub fn pretty_printed() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
