#![forbid(unsafe_code)]

//! Core Rule trait and related types for defining and executing rules

use crate::stylesheet::{LineIndex, Stylesheet};
use crate::types::{RuleId, Severity};
use std::path::{Path, PathBuf};

/// Execution context provided to rules when they run
///
/// This contains all the information a rule needs to analyze a stylesheet.
#[derive(Debug)]
pub struct CheckContext<'a> {
    /// Path to the file being analyzed
    pub file_path: &'a Path,

    /// Full text content of the file
    pub content: &'a str,

    /// Style rules found in the file
    pub stylesheet: &'a Stylesheet,

    /// Offset to line/column mapping for `content`
    pub line_index: &'a LineIndex,
}

impl CheckContext<'_> {
    /// Builds a violation anchored at an absolute byte offset of the file
    pub fn violation(
        &self,
        rule_id: &RuleId,
        severity: Severity,
        offset: usize,
        message: String,
        selector: &str,
    ) -> Violation {
        let (line, column) = self.line_index.line_col(offset);
        Violation {
            rule_id: rule_id.clone(),
            file: self.file_path.to_path_buf(),
            line,
            column,
            offset,
            severity,
            message,
            selector: selector.to_string(),
        }
    }
}

/// A single diagnostic reported by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// ID of the rule that reported this violation
    pub rule_id: RuleId,

    /// File the violation was found in
    pub file: PathBuf,

    /// Line number (1-indexed)
    pub line: u32,

    /// Column number (1-indexed)
    pub column: u32,

    /// Absolute byte offset in the file
    pub offset: usize,

    pub severity: Severity,

    /// Human-readable message describing the violation
    pub message: String,

    /// Selector of the style rule the violation belongs to
    pub selector: String,
}

/// Trait that all rules must implement
///
/// The trait is `Send + Sync` to enable parallel execution across files.
pub trait Rule: Send + Sync {
    /// Returns the unique identifier for this rule
    fn id(&self) -> &RuleId;

    /// Returns a human-readable description of what this rule checks
    fn description(&self) -> &str;

    /// Returns the severity level of violations from this rule
    fn severity(&self) -> Severity;

    /// The rule's primary option as written in the configuration
    fn primary_option(&self) -> Option<&str> {
        None
    }

    /// Checks every style rule of the stylesheet in the context
    ///
    /// Returns an empty vector if no violations are found.
    fn check(&self, ctx: &CheckContext) -> Vec<Violation>;
}
