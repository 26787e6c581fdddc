//! Stylesheet lint adapter.
//!
//! The style engine runs inside a background worker task that owns a
//! [`StyleLintSession`]. The editor side talks to it only through
//! [`WorkerMessage`]s and reads back [`WorkerResponse`]s; [`StyleLintClient`]
//! turns fresh responses into diagnostics and drops stale ones.

pub mod client;
pub mod protocol;
pub mod session;
pub mod worker;

pub use client::{ClientEvent, StyleLintClient, warning_to_diagnostic};
pub use protocol::{WorkerMessage, WorkerResponse};
pub use session::StyleLintSession;
pub use worker::{StyleLintWorker, StyleWorkerHandle};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::rule_config::RuleSet;

/// Default source label for stylesheet diagnostics.
pub const DEFAULT_SOURCE_LABEL: &str = "Stylelint";

/// Warnings with this prefix come from rule names the engine does not know.
pub const UNKNOWN_RULE_PREFIX: &str = "Unknown rule ";

/// One warning from the style engine. Lines and columns are 1-based; a
/// warning without a position points at the start of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleWarning {
    #[serde(default = "first_position")]
    pub line: usize,
    #[serde(default = "first_position")]
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub severity: String,
    pub text: String,
}

fn first_position() -> usize {
    1
}

/// Warnings reported for one linted source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleResult {
    #[serde(default)]
    pub warnings: Vec<StyleWarning>,
}

/// Full engine output; one result group per linted source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleLintOutput {
    #[serde(default)]
    pub results: Vec<StyleResult>,
}

impl StyleLintOutput {
    /// Flatten all result groups, dropping warnings about unknown rules.
    pub fn into_filtered_warnings(self) -> Vec<StyleWarning> {
        self.results
            .into_iter()
            .flat_map(|result| result.warnings)
            .filter(|warning| {
                let unknown = warning.text.starts_with(UNKNOWN_RULE_PREFIX);
                if unknown {
                    log::debug!("dropping warning: {}", warning.text);
                }
                !unknown
            })
            .collect()
    }
}

/// Configuration object passed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleLintConfig {
    pub rules: RuleSet,
}

/// The external, asynchronous stylesheet lint engine.
#[async_trait]
pub trait StyleLintEngine: Send + Sync {
    /// The engine's recommended rule set, used as the base configuration.
    fn recommended_rules(&self) -> RuleSet;

    /// Lint `code` with `config`.
    async fn lint(&self, code: &str, config: &StyleLintConfig) -> anyhow::Result<StyleLintOutput>;
}
