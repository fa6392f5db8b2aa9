#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All violation records (sorted by file, line, column)
//! 2. All parse_error records (sorted by file)
//! 3. One status record

use crate::engine::ExecutionResult;
use serde::Serialize;
use std::path::PathBuf;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the execution result as JSONL
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut output = String::new();

        for violation in &result.violations {
            push_record(
                &mut output,
                &ViolationRecord {
                    record_type: "violation",
                    rule: violation.rule_id.as_str(),
                    file: violation.file.clone(),
                    line: violation.line,
                    column: violation.column,
                    offset: violation.offset,
                    severity: violation.severity.as_str(),
                    message: &violation.message,
                    selector: &violation.selector,
                },
            );
        }

        for failure in &result.parse_failures {
            push_record(
                &mut output,
                &ParseErrorRecord {
                    record_type: "parse_error",
                    file: failure.file.clone(),
                    line: failure.line,
                    column: failure.column,
                    message: failure.error.message(),
                },
            );
        }

        push_record(
            &mut output,
            &StatusRecord {
                record_type: "status",
                passed: result.passed(),
                files_checked: result.files_checked as u64,
                errors: result.error_count() as u64,
                warnings: result.warning_count() as u64,
                parse_errors: result.parse_failures.len() as u64,
            },
        );

        output
    }

    pub fn write_to_stdout(&self, result: &ExecutionResult) {
        print!("{}", self.format(result));
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    match serde_json::to_string(record) {
        Ok(json) => {
            output.push_str(&json);
            output.push('\n');
        }
        Err(e) => log::warn!("Failed to serialize output record: {}", e),
    }
}

/// Violation record for JSONL output
#[derive(Debug, Serialize)]
struct ViolationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    rule: &'a str,
    file: PathBuf,
    line: u32,
    column: u32,
    offset: usize,
    severity: &'static str,
    message: &'a str,
    selector: &'a str,
}

/// Unparseable stylesheet record for JSONL output
#[derive(Debug, Serialize)]
struct ParseErrorRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: PathBuf,
    line: u32,
    column: u32,
    message: &'a str,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    errors: u64,
    warnings: u64,
    parse_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FileParseFailure;
    use crate::error::ParseError;
    use crate::rules::Violation;
    use crate::types::{RuleId, Severity};

    fn parse_lines(output: &str) -> Vec<serde_json::Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_result() {
        let result = ExecutionResult {
            files_checked: 3,
            ..ExecutionResult::default()
        };
        let records = parse_lines(&JsonlFormatter::new().format(&result));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "status");
        assert_eq!(records[0]["passed"], true);
        assert_eq!(records[0]["files_checked"], 3);
    }

    #[test]
    fn test_violation_and_status_records() {
        let result = ExecutionResult {
            violations: vec![Violation {
                rule_id: RuleId::new("scss/selector-nest-combinators").unwrap(),
                file: PathBuf::from("a.scss"),
                line: 2,
                column: 5,
                offset: 12,
                severity: Severity::Error,
                message: "Unexpected nesting found in selector".to_string(),
                selector: ".b".to_string(),
            }],
            parse_failures: vec![FileParseFailure {
                file: PathBuf::from("z.scss"),
                line: 1,
                column: 1,
                error: ParseError::stylesheet(0, "Unclosed block"),
            }],
            files_checked: 2,
            rules_executed: 1,
        };
        let records = parse_lines(&JsonlFormatter::default().format(&result));

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["type"], "violation");
        assert_eq!(records[0]["rule"], "scss/selector-nest-combinators");
        assert_eq!(records[0]["file"], "a.scss");
        assert_eq!(records[0]["line"], 2);
        assert_eq!(records[0]["offset"], 12);
        assert_eq!(records[0]["severity"], "error");
        assert_eq!(records[0]["selector"], ".b");

        assert_eq!(records[1]["type"], "parse_error");
        assert_eq!(records[1]["message"], "Unclosed block");

        assert_eq!(records[2]["type"], "status");
        assert_eq!(records[2]["passed"], false);
        assert_eq!(records[2]["errors"], 1);
        assert_eq!(records[2]["parse_errors"], 1);
    }
}
