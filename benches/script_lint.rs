use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lintbridge::script::{RuleMeta, Scope, ScriptFinding, ScriptLintConfig, ScriptLintEngine, ScriptLinter};
use lintbridge::{TextSnapshot, to_offset};

/// Reports one finding per line so the benchmark measures translation cost.
struct EveryLine;

impl ScriptLintEngine for EveryLine {
    fn verify(&self, text: &str, _config: &ScriptLintConfig) -> anyhow::Result<Vec<ScriptFinding>> {
        Ok(text
            .split('\n')
            .enumerate()
            .map(|(i, line)| ScriptFinding {
                rule_id: Some("no-unused-vars".to_string()),
                message: "'x' is assigned a value but never used.".to_string(),
                severity: 2,
                line: i + 1,
                column: 1,
                end_line: Some(i + 1),
                end_column: Some(line.chars().count() + 1),
            })
            .collect())
    }

    fn rules(&self) -> Vec<(String, RuleMeta)> {
        vec![(
            "no-unused-vars".to_string(),
            RuleMeta {
                recommended: true,
                description: None,
            },
        )]
    }
}

fn generate_test_content(line_count: usize) -> String {
    (0..line_count)
        .map(|i| format!("var value{i} = mw.config.get( 'wgPageName' ) + {i};"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_lint_source(c: &mut Criterion) {
    let linter = ScriptLinter::new(Box::new(EveryLine), &Scope::from_names(["mw", "$"]));
    let content = generate_test_content(5_000);

    c.bench_function("lint_source 5k lines", |b| {
        b.iter(|| {
            let doc = TextSnapshot::new(black_box(&content));
            linter.lint_source(&doc)
        })
    });
}

fn bench_to_offset(c: &mut Criterion) {
    let content = generate_test_content(5_000);
    let doc = TextSnapshot::new(&content);

    c.bench_function("to_offset", |b| {
        b.iter(|| {
            let mut total = 0;
            for line in (1..5_000).step_by(97) {
                total += to_offset(&doc, black_box(line), black_box(10));
            }
            total
        })
    });
}

criterion_group!(benches, bench_lint_source, bench_to_offset);
criterion_main!(benches);
