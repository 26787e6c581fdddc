use std::panic::{AssertUnwindSafe, catch_unwind};

use super::config::ScriptLintConfig;
use super::scope::Scope;
use super::{DEFAULT_SOURCE_LABEL, ScriptFinding, ScriptLintEngine};
use crate::config::ScriptSettings;
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::error::{LintError, LintResult};

/// Synchronous whole-document linter for scripts.
///
/// The engine configuration is built once at construction and reused for every
/// call, so repeated calls on an unchanged document return identical results.
pub struct ScriptLinter {
    engine: Box<dyn ScriptLintEngine>,
    config: ScriptLintConfig,
    source_label: String,
}

impl ScriptLinter {
    /// Linter with the engine's recommended rules and `scope` as read-only globals.
    pub fn new(engine: Box<dyn ScriptLintEngine>, scope: &Scope) -> Self {
        let config = ScriptLintConfig::recommended(engine.as_ref(), scope);
        Self {
            engine,
            config,
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }

    pub fn with_settings(engine: Box<dyn ScriptLintEngine>, scope: &Scope, settings: &ScriptSettings) -> Self {
        let config = ScriptLintConfig::build(engine.as_ref(), scope, settings);
        log::debug!(
            "script linter configured with {} rules and {} globals",
            config.rules.len(),
            config.language_options.globals.len()
        );
        Self {
            engine,
            config,
            source_label: settings.source_label.clone(),
        }
    }

    pub fn config(&self) -> &ScriptLintConfig {
        &self.config
    }

    /// Lint the full document text and return diagnostics in engine order.
    pub fn lint_source(&self, doc: &impl Document) -> LintResult<Vec<Diagnostic>> {
        let text = doc.text();
        let findings = match catch_unwind(AssertUnwindSafe(|| self.engine.verify(text, &self.config))) {
            Ok(Ok(findings)) => findings,
            Ok(Err(e)) => {
                log::error!("{} failed: {e:#}", self.source_label);
                return Err(LintError::engine_failure(&self.source_label, &e));
            }
            Err(payload) => {
                let err = LintError::engine_panic(&self.source_label, payload);
                log::error!("{err}");
                return Err(err);
            }
        };

        Ok(findings
            .iter()
            .map(|finding| finding_to_diagnostic(doc, finding, &self.source_label))
            .collect())
    }
}

/// Map one engine finding into a diagnostic.
///
/// Severity `1` becomes `info`, everything else `error`. The rule id, when
/// present, is appended to the message in parentheses.
pub fn finding_to_diagnostic(doc: &impl Document, finding: &ScriptFinding, source: &str) -> Diagnostic {
    let severity = match finding.severity {
        1 => Severity::Info,
        _ => Severity::Error,
    };
    let message = match &finding.rule_id {
        Some(rule) => format!("{} ({rule})", finding.message),
        None => finding.message.clone(),
    };
    let end = finding
        .end_line
        .map(|line| (line, finding.end_column.unwrap_or(1)));
    Diagnostic::from_positions(doc, source, message, severity, (finding.line, finding.column), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextSnapshot;
    use crate::script::RuleMeta;
    use pretty_assertions::assert_eq;

    fn finding(severity: u8, line: usize, column: usize) -> ScriptFinding {
        ScriptFinding {
            rule_id: None,
            message: "x".to_string(),
            severity,
            line,
            column,
            end_line: None,
            end_column: None,
        }
    }

    #[test]
    fn test_severity_one_is_info() {
        let doc = TextSnapshot::new("foo;");
        let finding = ScriptFinding {
            rule_id: Some("no-undef".to_string()),
            ..finding(1, 1, 1)
        };
        assert_eq!(
            finding_to_diagnostic(&doc, &finding, "ESLint"),
            Diagnostic {
                source: "ESLint".to_string(),
                message: "x (no-undef)".to_string(),
                severity: Severity::Info,
                from: 0,
                to: 1,
            }
        );
    }

    #[test]
    fn test_other_severities_are_error() {
        let doc = TextSnapshot::new("foo;");
        for severity in [0, 2, 3, 255] {
            let diag = finding_to_diagnostic(&doc, &finding(severity, 1, 1), "ESLint");
            assert_eq!(diag.severity, Severity::Error, "severity {severity}");
        }
    }

    #[test]
    fn test_message_without_rule_id() {
        let doc = TextSnapshot::new("foo(;");
        let finding = ScriptFinding {
            message: "Parsing error: Unexpected token ;".to_string(),
            ..finding(2, 1, 5)
        };
        let diag = finding_to_diagnostic(&doc, &finding, "ESLint");
        assert_eq!(diag.message, "Parsing error: Unexpected token ;");
        assert_eq!((diag.from, diag.to), (4, 5));
    }

    #[test]
    fn test_missing_end_line_spans_one_char() {
        // Line 2 starts at offset 10.
        let doc = TextSnapshot::new("var a = 1\nvar bb = 2;\n");
        let diag = finding_to_diagnostic(&doc, &finding(2, 2, 3), "ESLint");
        assert_eq!((diag.from, diag.to), (12, 13));
    }

    #[test]
    fn test_end_line_translated() {
        let doc = TextSnapshot::new("var a = 1\nvar bb = 2;\n");
        let finding = ScriptFinding {
            end_line: Some(2),
            end_column: Some(7),
            ..finding(2, 2, 5)
        };
        let diag = finding_to_diagnostic(&doc, &finding, "ESLint");
        assert_eq!((diag.from, diag.to), (14, 16));
    }

    struct Failing;

    impl ScriptLintEngine for Failing {
        fn verify(&self, _text: &str, _config: &ScriptLintConfig) -> anyhow::Result<Vec<ScriptFinding>> {
            anyhow::bail!("parser crashed")
        }

        fn rules(&self) -> Vec<(String, RuleMeta)> {
            Vec::new()
        }
    }

    struct Panicking;

    impl ScriptLintEngine for Panicking {
        fn verify(&self, _text: &str, _config: &ScriptLintConfig) -> anyhow::Result<Vec<ScriptFinding>> {
            panic!("rule blew up")
        }

        fn rules(&self) -> Vec<(String, RuleMeta)> {
            Vec::new()
        }
    }

    #[test]
    fn test_engine_error_is_returned() {
        let linter = ScriptLinter::new(Box::new(Failing), &Scope::new());
        let err = linter.lint_source(&TextSnapshot::new("x")).unwrap_err();
        assert_eq!(
            err,
            LintError::EngineFailure {
                engine: "ESLint".to_string(),
                message: "parser crashed".to_string(),
            }
        );
    }

    #[test]
    fn test_engine_panic_is_caught() {
        let linter = ScriptLinter::new(Box::new(Panicking), &Scope::new());
        let err = linter.lint_source(&TextSnapshot::new("x")).unwrap_err();
        assert_eq!(
            err,
            LintError::EnginePanic {
                engine: "ESLint".to_string(),
                message: "rule blew up".to_string(),
            }
        );
    }
}
