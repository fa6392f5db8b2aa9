//! Performance benchmarks for nestlint
//!
//! Run with: cargo bench
//!
//! Measured stages:
//! - Selector parsing
//! - Stylesheet scanning
//! - Nesting policy evaluation
//! - File walking
//! - The full check workflow over a temporary project

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nestlint::config::{RuleValue, RulesConfig};
use nestlint::engine::{ExecutionEngine, FileEntry, FileWalker};
use nestlint::rules::{Expectation, NestingPolicy, RuleRegistry};
use nestlint::selector::parse_selector;
use nestlint::stylesheet::{RuleParent, parse_stylesheet};
use nestlint::{GlobPattern, ReportMode, RuleId, Syntax};
use std::fs;
use tempfile::TempDir;

const SELECTORS: &[&str] = &[
    ".foo",
    ".foo .bar",
    ".foo > .bar ~ .baz + .qux",
    "a.button:hover::before",
    "&:not(.disabled) > .item",
    "input[type=\"text\"], textarea:focus-visible",
    ".card__#{$modifier}",
];

/// Build an SCSS stylesheet with `rules` top-level blocks, each holding a
/// nested child rule
fn generate_stylesheet(rules: usize) -> String {
    let mut content = String::new();
    for i in 0..rules {
        content.push_str(&format!(
            ".block-{i} > .element-{i} {{\n  color: red;\n  .child-{i} ~ .sibling {{\n    margin: 0;\n  }}\n  &:hover {{ color: blue; }}\n}}\n\n"
        ));
    }
    content
}

/// Create a temporary project with `file_count` stylesheets
fn create_test_files(file_count: usize, rules_per_file: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let styles = temp_dir.path().join("styles");
    fs::create_dir(&styles).unwrap();

    let content = generate_stylesheet(rules_per_file);
    for i in 0..file_count {
        let ext = if i % 5 == 0 { "css" } else { "scss" };
        fs::write(styles.join(format!("file_{i}.{ext}")), &content).unwrap();
    }
    fs::write(temp_dir.path().join("README.md"), "# not a stylesheet\n").unwrap();

    temp_dir
}

fn registry(expectation: &str) -> RuleRegistry {
    let rules: RulesConfig = [(
        RuleId::new("scss/selector-nest-combinators").unwrap(),
        RuleValue::Expectation(expectation.to_string()),
    )]
    .into_iter()
    .collect();
    RuleRegistry::build_from_config(&rules).unwrap()
}

// ============================================================================
// Selector Benchmarks
// ============================================================================

/// Benchmark selector parsing across selectors of increasing complexity
fn bench_selector_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_parsing");

    for (i, selector) in SELECTORS.iter().enumerate() {
        group.throughput(Throughput::Bytes(selector.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", i), selector, |b, selector| {
            b.iter(|| black_box(parse_selector(black_box(selector))))
        });
    }

    group.finish();
}

/// Benchmark both expectations over pre-parsed trees
fn bench_policy_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_evaluation");

    let trees: Vec<_> = SELECTORS
        .iter()
        .map(|selector| (*selector, parse_selector(selector).unwrap()))
        .collect();

    for expectation in [Expectation::Always, Expectation::Never] {
        let policy = NestingPolicy::new(expectation, ReportMode::Each).unwrap();
        group.bench_function(expectation.as_str(), |b| {
            b.iter(|| {
                for (selector, tree) in &trees {
                    black_box(policy.evaluate(tree, selector, &RuleParent::Rule));
                }
            })
        });
    }

    group.finish();
}

// ============================================================================
// Stylesheet Benchmarks
// ============================================================================

/// Benchmark block scanning for stylesheets of different sizes
fn bench_stylesheet_scanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("stylesheet_scanning");

    for rules in [10, 100, 1000].iter() {
        let content = generate_stylesheet(*rules);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("scss", rules), &content, |b, content| {
            b.iter(|| black_box(parse_stylesheet(content, Syntax::Scss)))
        });
    }

    group.finish();
}

// ============================================================================
// File Walking Benchmarks
// ============================================================================

/// Benchmark file discovery with and without patterns
fn bench_file_walking(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_walking");

    for file_count in [10, 50, 100].iter() {
        let temp_dir = create_test_files(*file_count, 1);

        group.throughput(Throughput::Elements(*file_count as u64));

        group.bench_with_input(
            BenchmarkId::new("unfiltered", file_count),
            file_count,
            |b, _| {
                b.iter(|| {
                    let walker = FileWalker::new(temp_dir.path(), &[], &[]).unwrap();
                    let files: Vec<_> = walker.walk().collect();
                    black_box(files)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("scss_only", file_count),
            file_count,
            |b, _| {
                b.iter(|| {
                    let include = vec![GlobPattern::new("**/*.scss")];
                    let exclude = vec![GlobPattern::new("**/file_1*")];
                    let walker = FileWalker::new(temp_dir.path(), &include, &exclude).unwrap();
                    let files: Vec<_> = walker.walk().collect();
                    black_box(files)
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Workflow Benchmarks
// ============================================================================

/// Benchmark the complete check: walk, scan, parse, evaluate, sort
fn bench_full_workflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_workflow");
    group.sample_size(10);

    for file_count in [10, 50].iter() {
        let temp_dir = create_test_files(*file_count, 50);
        let walker = FileWalker::new(temp_dir.path(), &[], &[]).unwrap();
        let files: Vec<FileEntry> = walker.walk().filter_map(Result::ok).collect();

        group.throughput(Throughput::Elements(*file_count as u64));

        for expectation in ["always", "never"] {
            let engine = ExecutionEngine::new(registry(expectation));
            group.bench_with_input(
                BenchmarkId::new(expectation, file_count),
                &files,
                |b, files| b.iter(|| black_box(engine.execute(files.clone()))),
            );
        }
    }

    group.finish();
}

criterion_group!(
    selector_benches,
    bench_selector_parsing,
    bench_policy_evaluation,
);

criterion_group!(stylesheet_benches, bench_stylesheet_scanning);

criterion_group!(workflow_benches, bench_file_walking, bench_full_workflow);

criterion_main!(selector_benches, stylesheet_benches, workflow_benches);
