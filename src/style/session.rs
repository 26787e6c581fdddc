use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use super::protocol::{WorkerMessage, WorkerResponse};
use super::{DEFAULT_SOURCE_LABEL, StyleLintConfig, StyleLintEngine, StyleWarning};
use crate::config::StyleSettings;
use crate::error::{LintError, LintResult};
use crate::rule_config::{RuleSet, merge_rules};

/// State owned by one style worker: the engine, its recommended rules and the
/// current custom rule overrides.
///
/// One session per editor instance. Nothing here is shared with the caller;
/// all access goes through the methods below (directly or via messages).
pub struct StyleLintSession {
    engine: Box<dyn StyleLintEngine>,
    recommended: RuleSet,
    custom_rules: Option<RuleSet>,
    source_label: String,
}

impl StyleLintSession {
    pub fn new(engine: Box<dyn StyleLintEngine>) -> Self {
        let recommended = engine.recommended_rules();
        Self {
            engine,
            recommended,
            custom_rules: None,
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }

    /// Session with the configured label and, when present, initial custom rules.
    pub fn with_settings(engine: Box<dyn StyleLintEngine>, settings: &StyleSettings) -> Self {
        let mut session = Self::new(engine);
        session.source_label = settings.source_label.clone();
        if !settings.rules.is_empty() {
            session.set_config(settings.rules.clone());
        }
        session
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Replace the custom rule overrides.
    pub fn set_config(&mut self, rules: RuleSet) {
        log::debug!("style session received {} custom rules", rules.len());
        self.custom_rules = Some(rules);
    }

    pub fn custom_rules(&self) -> Option<&RuleSet> {
        self.custom_rules.as_ref()
    }

    /// Recommended rules with the custom overrides merged on top.
    pub fn get_config(&self) -> RuleSet {
        match &self.custom_rules {
            Some(custom) => merge_rules(&self.recommended, custom),
            None => self.recommended.clone(),
        }
    }

    /// Lint `code` with the merged configuration.
    ///
    /// Warnings from all result groups are flattened; warnings about unknown
    /// rules are dropped. Engine errors and panics come back as `Err`.
    pub async fn lint(&self, code: &str) -> LintResult<Vec<StyleWarning>> {
        let config = StyleLintConfig {
            rules: self.get_config(),
        };
        let outcome = AssertUnwindSafe(self.engine.lint(code, &config))
            .catch_unwind()
            .await;
        match outcome {
            Ok(Ok(output)) => Ok(output.into_filtered_warnings()),
            Ok(Err(e)) => {
                log::error!("{} failed: {e:#}", self.source_label);
                Err(LintError::engine_failure(&self.source_label, &e))
            }
            Err(payload) => {
                let err = LintError::engine_panic(&self.source_label, payload);
                log::error!("{err}");
                Err(err)
            }
        }
    }

    /// Apply one protocol message. `setConfig` produces no response.
    pub async fn handle(&mut self, message: WorkerMessage) -> Option<WorkerResponse> {
        match message {
            WorkerMessage::SetConfig { payload } => {
                self.set_config(payload);
                None
            }
            WorkerMessage::GetConfig => Some(WorkerResponse::GetConfig {
                payload: self.get_config(),
            }),
            WorkerMessage::Lint { payload } => {
                let result = self.lint(&payload).await;
                Some(WorkerResponse::Lint { code: payload, result })
            }
        }
    }
}
