//! Editor-side companion of the style worker.
//!
//! Remembers which text was submitted last, so responses for older snapshots
//! can be recognised and dropped, and maps fresh warnings to diagnostics.

use std::collections::VecDeque;

use super::protocol::{WorkerMessage, WorkerResponse};
use super::worker::StyleWorkerHandle;
use super::{DEFAULT_SOURCE_LABEL, StyleWarning};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, TextSnapshot};
use crate::error::{LintError, LintResult};
use crate::rule_config::RuleSet;

/// What a worker response means for the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Diagnostics for the latest submitted text.
    Diagnostics(Vec<Diagnostic>),
    /// Linting the latest submitted text failed.
    Failed(LintError),
    /// Response for text that has since been superseded.
    Stale { code: String },
    /// Merged configuration reported by the worker.
    Config(RuleSet),
}

pub struct StyleLintClient {
    handle: StyleWorkerHandle,
    latest: Option<String>,
    /// Responses set aside by `lint` / `get_config`, replayed by `next_event`.
    held: VecDeque<WorkerResponse>,
    source_label: String,
}

impl StyleLintClient {
    pub fn new(handle: StyleWorkerHandle) -> Self {
        Self::with_source_label(handle, DEFAULT_SOURCE_LABEL)
    }

    pub fn with_source_label(handle: StyleWorkerHandle, source_label: impl Into<String>) -> Self {
        Self {
            handle,
            latest: None,
            held: VecDeque::new(),
            source_label: source_label.into(),
        }
    }

    /// The most recently submitted text, if any.
    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    pub fn set_config(&self, rules: RuleSet) -> LintResult<()> {
        self.handle.post_message(WorkerMessage::SetConfig { payload: rules })
    }

    pub fn request_config(&self) -> LintResult<()> {
        self.handle.post_message(WorkerMessage::GetConfig)
    }

    /// Submit `code` for linting; it becomes the only non-stale snapshot.
    /// Never waits, however many responses are still unread.
    pub fn request_lint(&mut self, code: impl Into<String>) -> LintResult<()> {
        let code = code.into();
        self.latest = Some(code.clone());
        self.handle.post_message(WorkerMessage::Lint { payload: code })
    }

    /// Classify a response against the latest submitted text.
    pub fn accept(&self, response: WorkerResponse) -> ClientEvent {
        match response {
            WorkerResponse::GetConfig { payload } => ClientEvent::Config(payload),
            WorkerResponse::Lint { code, result } => {
                if self.latest.as_deref() != Some(code.as_str()) {
                    log::debug!("discarding stale lint response ({} chars)", code.chars().count());
                    return ClientEvent::Stale { code };
                }
                match result {
                    Ok(warnings) => {
                        let doc = TextSnapshot::new(&code);
                        ClientEvent::Diagnostics(
                            warnings
                                .iter()
                                .map(|warning| warning_to_diagnostic(&doc, warning, &self.source_label))
                                .collect(),
                        )
                    }
                    Err(error) => ClientEvent::Failed(error),
                }
            }
        }
    }

    /// Wait for the next response and classify it.
    ///
    /// Responses held back by [`lint`](Self::lint) or
    /// [`get_config`](Self::get_config) come first, in arrival order.
    pub async fn next_event(&mut self) -> LintResult<ClientEvent> {
        let response = match self.held.pop_front() {
            Some(response) => response,
            None => self.recv().await?,
        };
        Ok(self.accept(response))
    }

    async fn recv(&mut self) -> LintResult<WorkerResponse> {
        self.handle.recv().await.ok_or(LintError::WorkerGone)
    }

    /// Submit `code` and wait for its diagnostics.
    ///
    /// Stale lint responses that arrive in between are dropped. Config
    /// responses are held for [`next_event`](Self::next_event).
    pub async fn lint(&mut self, code: impl Into<String>) -> LintResult<Vec<Diagnostic>> {
        self.request_lint(code)?;
        loop {
            let response = self.recv().await?;
            if matches!(response, WorkerResponse::GetConfig { .. }) {
                self.held.push_back(response);
                continue;
            }
            match self.accept(response) {
                ClientEvent::Diagnostics(diagnostics) => return Ok(diagnostics),
                ClientEvent::Failed(error) => return Err(error),
                _ => continue,
            }
        }
    }

    /// Ask for the merged configuration and wait for it.
    ///
    /// Lint responses that arrive first are held for
    /// [`next_event`](Self::next_event), so results and failures of a lint
    /// in flight are not lost.
    pub async fn get_config(&mut self) -> LintResult<RuleSet> {
        self.request_config()?;
        loop {
            match self.recv().await? {
                WorkerResponse::GetConfig { payload } => return Ok(payload),
                response => self.held.push_back(response),
            }
        }
    }

    pub async fn shutdown(self) {
        self.handle.shutdown().await;
    }
}

/// Map one style warning into a diagnostic against the text it was produced for.
///
/// `"error"` and `"warning"` keep their severity; anything else is `info`.
pub fn warning_to_diagnostic(doc: &impl Document, warning: &StyleWarning, source: &str) -> Diagnostic {
    let severity = match warning.severity.as_str() {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    };
    let end = warning
        .end_line
        .map(|line| (line, warning.end_column.unwrap_or(1)));
    Diagnostic::from_positions(
        doc,
        source,
        warning.text.clone(),
        severity,
        (warning.line, warning.column),
        end,
    )
}
