#![forbid(unsafe_code)]

//! Parallel execution engine for running rules across files
//!
//! This module provides the ExecutionEngine which scans each discovered
//! stylesheet once and runs every enabled rule against it, processing files in
//! parallel using rayon.

use crate::engine::file_walker::FileEntry;
use crate::error::ParseError;
use crate::rules::{CheckContext, RuleRegistry, Violation};
use crate::stylesheet::{LineIndex, parse_stylesheet};
use crate::types::{Severity, Syntax};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A stylesheet whose block structure could not be scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParseFailure {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub error: ParseError,
}

/// Result of executing all rules against all files
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// All violations found across all files and rules, sorted by position
    pub violations: Vec<Violation>,
    /// Files that could not be scanned
    pub parse_failures: Vec<FileParseFailure>,
    /// Number of files checked
    pub files_checked: usize,
    /// Number of rules executed
    pub rules_executed: usize,
}

impl ExecutionResult {
    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// A run passes when no error-severity violation was found and every file
    /// could be scanned
    pub fn passed(&self) -> bool {
        self.error_count() == 0 && self.parse_failures.is_empty()
    }
}

enum FileOutcome {
    Checked(Vec<Violation>),
    Failed(FileParseFailure),
    Unreadable,
}

/// Execution engine that coordinates parallel rule execution
///
/// The engine:
/// - Executes all enabled rules against discovered files
/// - Uses rayon for parallel file processing
/// - Scans each stylesheet once and shares the result across rules
/// - Collects violations from all rules
pub struct ExecutionEngine {
    registry: Arc<RuleRegistry>,
}

impl ExecutionEngine {
    /// Creates a new ExecutionEngine with the provided rule registry
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Execute all rules against the discovered files
    ///
    /// Violations come back ordered by file, line and column.
    pub fn execute(&self, files: Vec<FileEntry>) -> ExecutionResult {
        let rules_executed = self.registry.len();

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| self.execute_file(file))
            .collect();

        let mut result = ExecutionResult {
            rules_executed,
            ..ExecutionResult::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Checked(violations) => {
                    result.files_checked += 1;
                    result.violations.extend(violations);
                }
                FileOutcome::Failed(failure) => {
                    result.files_checked += 1;
                    result.parse_failures.push(failure);
                }
                FileOutcome::Unreadable => {}
            }
        }

        result.violations.sort_by(|a, b| {
            (&a.file, a.line, a.column, &a.rule_id).cmp(&(&b.file, b.line, b.column, &b.rule_id))
        });
        result.parse_failures.sort_by(|a, b| a.file.cmp(&b.file));

        log::info!(
            "checked {} files with {} rules: {} violations, {} unparseable",
            result.files_checked,
            rules_executed,
            result.violations.len(),
            result.parse_failures.len()
        );
        result
    }

    /// Run every rule against in-memory source text
    ///
    /// # Errors
    ///
    /// Returns the scanner's `ParseError` when the block structure of
    /// `content` is malformed.
    pub fn check_source(
        &self,
        path: &Path,
        content: &str,
        syntax: Syntax,
    ) -> Result<Vec<Violation>, ParseError> {
        let stylesheet = parse_stylesheet(content, syntax)?;
        let line_index = LineIndex::new(content);
        let ctx = CheckContext {
            file_path: path,
            content,
            stylesheet: &stylesheet,
            line_index: &line_index,
        };

        log::trace!(
            "{}: {} style rules",
            path.display(),
            stylesheet.rules.len()
        );

        Ok(self
            .registry
            .iter_rules()
            .flat_map(|rule| rule.check(&ctx))
            .collect())
    }

    fn execute_file(&self, file: &FileEntry) -> FileOutcome {
        // Unreadable files are logged and skipped
        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read file {}: {}", file.path.display(), e);
                return FileOutcome::Unreadable;
            }
        };

        match self.check_source(&file.path, &content, file.syntax) {
            Ok(violations) => FileOutcome::Checked(violations),
            Err(error) => {
                let (line, column) = LineIndex::new(&content).line_col(error.offset());
                log::debug!("{}: {}", file.path.display(), error);
                FileOutcome::Failed(FileParseFailure {
                    file: file.path.clone(),
                    line,
                    column,
                    error,
                })
            }
        }
    }
}
