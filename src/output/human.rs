#![forbid(unsafe_code)]

//! Human-readable output grouped by file

use crate::engine::ExecutionResult;
use crate::rules::Violation;
use crate::types::Severity;
use std::io::{self, Write};
use std::path::Path;
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Formatter that prints diagnostics grouped by file
pub struct HumanFormatter {
    color: ColorChoice,
}

impl HumanFormatter {
    pub fn new(color: ColorChoice) -> Self {
        Self { color }
    }

    /// Render the report without any color codes
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut buffer = Buffer::no_color();
        // Writes to an in-memory buffer cannot fail
        let _ = self.write(&mut buffer, result);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    pub fn write_to_stdout(&self, result: &ExecutionResult) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color);
        self.write(&mut stdout, result)
    }

    /// Write the report: one section per file, then a summary line
    pub fn write<W: WriteColor>(&self, out: &mut W, result: &ExecutionResult) -> io::Result<()> {
        let mut current: Option<&Path> = None;

        for violation in &result.violations {
            if current != Some(violation.file.as_path()) {
                if current.is_some() {
                    writeln!(out)?;
                }
                write_file_header(out, &violation.file)?;
                current = Some(violation.file.as_path());
            }
            write_violation(out, violation)?;
        }

        if !result.violations.is_empty() {
            writeln!(out)?;
        }

        for failure in &result.parse_failures {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "error")?;
            out.reset()?;
            writeln!(
                out,
                ": {}:{}:{}: cannot parse stylesheet: {}",
                failure.file.display(),
                failure.line,
                failure.column,
                failure.error.message()
            )?;
        }

        self.write_summary(out, result)
    }

    fn write_summary<W: WriteColor>(&self, out: &mut W, result: &ExecutionResult) -> io::Result<()> {
        let summary = format!(
            "{} error(s), {} warning(s) in {} file(s)",
            result.error_count(),
            result.warning_count(),
            result.files_checked
        );

        let color = if result.passed() {
            Color::Green
        } else {
            Color::Red
        };
        out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(out, "{}", if result.passed() { "✓" } else { "✗" })?;
        out.reset()?;
        writeln!(out, " {}", summary)?;

        if !result.parse_failures.is_empty() {
            writeln!(
                out,
                "{} file(s) could not be parsed",
                result.parse_failures.len()
            )?;
        }
        Ok(())
    }
}

fn write_file_header<W: WriteColor>(out: &mut W, file: &Path) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_underline(true))?;
    write!(out, "{}", file.display())?;
    out.reset()?;
    writeln!(out)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

fn write_violation<W: WriteColor>(out: &mut W, violation: &Violation) -> io::Result<()> {
    write!(out, "  {}:{}  ", violation.line, violation.column)?;
    out.set_color(ColorSpec::new().set_fg(Some(severity_color(violation.severity))))?;
    write!(out, "{:<7}", violation.severity.as_str())?;
    out.reset()?;
    write!(out, "  {}  ", violation.message)?;
    out.set_color(ColorSpec::new().set_dimmed(true))?;
    write!(out, "{}", violation.rule_id)?;
    out.reset()?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FileParseFailure;
    use crate::error::ParseError;
    use crate::types::RuleId;
    use std::path::PathBuf;

    fn violation(file: &str, line: u32, severity: Severity, message: &str) -> Violation {
        Violation {
            rule_id: RuleId::new("scss/selector-nest-combinators").unwrap(),
            file: PathBuf::from(file),
            line,
            column: 3,
            offset: 0,
            severity,
            message: message.to_string(),
            selector: ".a .b".to_string(),
        }
    }

    #[test]
    fn test_empty_result() {
        let result = ExecutionResult {
            files_checked: 2,
            rules_executed: 1,
            ..ExecutionResult::default()
        };
        let output = HumanFormatter::new(ColorChoice::Never).format(&result);
        assert_eq!(output, "✓ 0 error(s), 0 warning(s) in 2 file(s)\n");
    }

    #[test]
    fn test_grouped_by_file() {
        let result = ExecutionResult {
            violations: vec![
                violation("a.scss", 1, Severity::Error, "first"),
                violation("a.scss", 4, Severity::Warning, "second"),
                violation("b.scss", 2, Severity::Error, "third"),
            ],
            files_checked: 2,
            rules_executed: 1,
            ..ExecutionResult::default()
        };
        let output = HumanFormatter::new(ColorChoice::Never).format(&result);

        assert_eq!(output.matches("a.scss\n").count(), 1);
        assert!(output.contains("  1:3  error    first  scss/selector-nest-combinators\n"));
        assert!(output.contains("  4:3  warning  second  scss/selector-nest-combinators\n"));
        assert!(output.contains("\nb.scss\n"));
        assert!(output.ends_with("✗ 2 error(s), 1 warning(s) in 2 file(s)\n"));
    }

    #[test]
    fn test_parse_failures_listed() {
        let result = ExecutionResult {
            parse_failures: vec![FileParseFailure {
                file: PathBuf::from("broken.scss"),
                line: 3,
                column: 1,
                error: ParseError::stylesheet(20, "Unexpected '}'"),
            }],
            files_checked: 1,
            ..ExecutionResult::default()
        };
        let output = HumanFormatter::new(ColorChoice::Never).format(&result);
        assert!(output.contains("error: broken.scss:3:1: cannot parse stylesheet: Unexpected '}'\n"));
        assert!(output.contains("1 file(s) could not be parsed"));
    }
}
