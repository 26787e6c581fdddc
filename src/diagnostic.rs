//! Editor-facing diagnostic shape shared by both adapters.

use serde::{Deserialize, Serialize};

use crate::document::{Document, to_offset};
use crate::error::LintError;

/// Source label attached to diagnostics produced from a [`LintError`].
pub const ERROR_SOURCE: &str = "lintbridge";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single lint finding translated into editor offsets.
///
/// `from <= to` and both lie within `0..=document length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub source: String,
    pub message: String,
    pub severity: Severity,
    pub from: usize,
    pub to: usize,
}

impl Diagnostic {
    /// Build a diagnostic from engine-reported positions.
    ///
    /// Without an end line the span covers a single character. Offsets are
    /// clamped to the document so the span invariant holds even when the
    /// engine reports positions outside the text.
    pub fn from_positions(
        doc: &impl Document,
        source: &str,
        message: String,
        severity: Severity,
        start: (usize, usize),
        end: Option<(usize, usize)>,
    ) -> Self {
        let from = to_offset(doc, start.0, start.1);
        let to = match end {
            Some((line, column)) => to_offset(doc, line, column),
            None => from + 1,
        };
        let len = doc.len();
        let from = from.min(len);
        let to = to.clamp(from, len);
        Self {
            source: source.to_string(),
            message,
            severity,
            from,
            to,
        }
    }
}

impl LintError {
    /// Render a failed lint pass as a visible error marker at the top of the
    /// document.
    pub fn to_diagnostic(&self, doc: &impl Document) -> Diagnostic {
        Diagnostic {
            source: ERROR_SOURCE.to_string(),
            message: self.to_string(),
            severity: Severity::Error,
            from: 0,
            to: doc.len().min(1),
        }
    }
}
