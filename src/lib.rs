//! Lint adapters that turn lint engine output into editor diagnostics.
//!
//! Two pipelines share one [`Diagnostic`] shape:
//!
//! - [`script::ScriptLinter`] runs a script engine synchronously over the whole
//!   document and maps its findings to diagnostics.
//! - [`style::StyleLintWorker`] runs a stylesheet engine in a background task,
//!   driven by `setConfig` / `getConfig` / `lint` messages;
//!   [`style::StyleLintClient`] consumes its responses on the editor side.
//!
//! The engines themselves are external and plugged in through the
//! [`script::ScriptLintEngine`] and [`style::StyleLintEngine`] traits.

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod rule_config;
pub mod script;
pub mod style;

pub use crate::config::Config;
pub use crate::diagnostic::{Diagnostic, Severity};
pub use crate::document::{Document, TextSnapshot, to_offset};
pub use crate::error::{LintError, LintResult};
pub use crate::rule_config::{RuleSet, merge_rules};

use crate::script::{Scope, ScriptLintEngine, ScriptLinter};
use crate::style::{StyleLintClient, StyleLintEngine, StyleLintSession, StyleLintWorker};

/// Build a script linter from the `[script]` section of `config`.
pub fn script_linter(engine: Box<dyn ScriptLintEngine>, scope: &Scope, config: &Config) -> ScriptLinter {
    ScriptLinter::with_settings(engine, scope, &config.script)
}

/// Spawn a style worker from the `[style]` and `[worker]` sections of
/// `config` and wrap it in a client.
///
/// Must be called from within a tokio runtime.
pub fn spawn_style_linter(engine: Box<dyn StyleLintEngine>, config: &Config) -> StyleLintClient {
    let session = StyleLintSession::with_settings(engine, &config.style);
    let handle = StyleLintWorker::spawn(session, config.worker.queue_capacity);
    StyleLintClient::with_source_label(handle, config.style.source_label.clone())
}
