//! Fake lint engines shared by the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lintbridge::rule_config::RuleSet;
use lintbridge::script::{RuleMeta, ScriptFinding, ScriptLintConfig, ScriptLintEngine};
use lintbridge::style::{StyleLintConfig, StyleLintEngine, StyleLintOutput, StyleResult, StyleWarning};
use serde_json::{Value, json};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rules(value: Value) -> RuleSet {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Script engine that flags `debugger` statements (error, with end position)
/// and `==` comparisons (severity 1, no end position).
#[derive(Default)]
pub struct FakeScriptEngine {
    pub calls: Mutex<Vec<ScriptLintConfig>>,
}

impl ScriptLintEngine for FakeScriptEngine {
    fn verify(&self, text: &str, config: &ScriptLintConfig) -> anyhow::Result<Vec<ScriptFinding>> {
        self.calls.lock().unwrap().push(config.clone());
        let mut findings = Vec::new();
        for (index, line) in text.split('\n').enumerate() {
            let line_no = index + 1;
            if let Some(byte) = line.find("debugger") {
                let column = line[..byte].chars().count() + 1;
                findings.push(ScriptFinding {
                    rule_id: Some("no-debugger".to_string()),
                    message: "Unexpected 'debugger' statement.".to_string(),
                    severity: 2,
                    line: line_no,
                    column,
                    end_line: Some(line_no),
                    end_column: Some(column + "debugger".len()),
                });
            }
            let mut search = 0;
            while let Some(found) = line[search..].find("==") {
                let byte = search + found;
                if line[byte..].starts_with("===") {
                    search = byte + 3;
                    continue;
                }
                findings.push(ScriptFinding {
                    rule_id: Some("eqeqeq".to_string()),
                    message: "Expected '===' and instead saw '=='.".to_string(),
                    severity: 1,
                    line: line_no,
                    column: line[..byte].chars().count() + 1,
                    end_line: None,
                    end_column: None,
                });
                search = byte + 2;
            }
        }
        Ok(findings)
    }

    fn rules(&self) -> Vec<(String, RuleMeta)> {
        vec![
            (
                "no-debugger".to_string(),
                RuleMeta {
                    recommended: true,
                    description: Some("Disallow the use of `debugger`".to_string()),
                },
            ),
            ("eqeqeq".to_string(), RuleMeta::default()),
            (
                "no-undef".to_string(),
                RuleMeta {
                    recommended: true,
                    description: None,
                },
            ),
        ]
    }
}

/// Style engine that flags the literal `#ffg` and echoes an "Unknown rule"
/// warning for every configured rule whose name starts with `bogus`.
///
/// Code containing `SLOW` takes 50ms; code containing `FAIL` errors out;
/// code containing `PANIC` panics.
#[derive(Default)]
pub struct FakeStyleEngine {
    pub lint_calls: AtomicUsize,
}

#[async_trait]
impl StyleLintEngine for FakeStyleEngine {
    fn recommended_rules(&self) -> RuleSet {
        rules(json!({
            "color-no-invalid-hex": true,
            "block-no-empty": true,
            "font-family-no-duplicate-names": true
        }))
    }

    async fn lint(&self, code: &str, config: &StyleLintConfig) -> anyhow::Result<StyleLintOutput> {
        self.lint_calls.fetch_add(1, Ordering::SeqCst);
        if code.contains("SLOW") {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        if code.contains("FAIL") {
            anyhow::bail!("CssSyntaxError: Unclosed block");
        }
        if code.contains("PANIC") {
            panic!("engine bug");
        }

        let mut unknown = Vec::new();
        for name in config.rules.keys().filter(|name| name.starts_with("bogus")) {
            unknown.push(StyleWarning {
                line: 1,
                column: 1,
                end_line: None,
                end_column: None,
                rule: name.clone(),
                severity: "error".to_string(),
                text: format!("Unknown rule {name}."),
            });
        }

        let mut found = Vec::new();
        if config.rules.get("color-no-invalid-hex") != Some(&Value::Null) {
            for (index, line) in code.split('\n').enumerate() {
                if let Some(byte) = line.find("#ffg") {
                    let column = line[..byte].chars().count() + 1;
                    let severity = match config.rules.get("color-no-invalid-hex") {
                        Some(Value::String(s)) => s.clone(),
                        _ => "error".to_string(),
                    };
                    found.push(StyleWarning {
                        line: index + 1,
                        column,
                        end_line: Some(index + 1),
                        end_column: Some(column + 4),
                        rule: "color-no-invalid-hex".to_string(),
                        severity,
                        text: "Unexpected invalid hex color \"#ffg\" (color-no-invalid-hex)".to_string(),
                    });
                }
            }
        }

        Ok(StyleLintOutput {
            results: vec![StyleResult { warnings: unknown }, StyleResult { warnings: found }],
        })
    }
}
