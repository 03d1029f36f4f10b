//! # Validation Diagnostics
//!
//! Human-readable findings produced by validation. One diagnostic per
//! violated constraint, each tagged with the JSON Pointer of the offending
//! value inside the encoded tree.

use std::fmt;

use serde::Serialize;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// JSON Pointer to the offending value (empty for the root object).
    pub path: String,
    /// Description of the violation.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every diagnostic collected by one validation pass, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn from_vec(items: Vec<Diagnostic>) -> Self {
        Self { items }
    }

    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if validation found nothing wrong.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a slice of all diagnostics.
    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Iterate over the messages only.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|d| d.message.as_str())
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {d}")?;
        }
        Ok(())
    }
}
