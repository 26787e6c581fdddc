//! Script lint adapter.
//!
//! Runs a script lint engine synchronously against the whole document and maps
//! its findings into [`Diagnostic`](crate::diagnostic::Diagnostic)s.

pub mod config;
pub mod linter;
pub mod scope;

pub use config::{EcmaVersion, GlobalAccess, LanguageOptions, RuleLevel, RuleSetting, ScriptLintConfig, SourceType};
pub use linter::{ScriptLinter, finding_to_diagnostic};
pub use scope::{Completion, CompletionKind, CompletionOption, Scope, complete_at};

use serde::{Deserialize, Serialize};

/// Default source label for script diagnostics.
pub const DEFAULT_SOURCE_LABEL: &str = "ESLint";

/// A raw finding as reported by the script engine.
///
/// Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptFinding {
    #[serde(default)]
    pub rule_id: Option<String>,
    pub message: String,
    pub severity: u8,
    pub line: usize,
    pub column: usize,
    #[serde(default)]
    pub end_line: Option<usize>,
    #[serde(default)]
    pub end_column: Option<usize>,
}

/// Rule metadata exposed by the engine's rule introspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMeta {
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// The external script lint engine.
///
/// Implementations wrap the actual analyzer; this crate never inspects source
/// code itself.
pub trait ScriptLintEngine: Send + Sync {
    /// Lint `text` with `config` and return findings in engine order.
    ///
    /// Parse errors are expected to come back as findings, not as `Err`.
    fn verify(&self, text: &str, config: &ScriptLintConfig) -> anyhow::Result<Vec<ScriptFinding>>;

    /// Every rule the engine knows, with its metadata.
    fn rules(&self) -> Vec<(String, RuleMeta)>;
}
