//! Check command implementation
//!
//! This module implements the `nestlint check` command, which:
//! - Loads configuration from nestlint.toml
//! - Discovers stylesheets to check
//! - Executes all enabled rules in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_FAILED, EXIT_PARSE_ERROR, EXIT_SUCCESS, build_registry, discover_files,
    load_config, resolve_color, resolve_format,
};
use crate::engine::executor::ExecutionEngine;
use crate::error::{ConfigError, RuleError};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::path::Path;

/// Error type specific to check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] crate::engine::file_walker::FileWalkerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    fn exit_code(&self) -> i32 {
        match self {
            // TOML syntax and schema errors
            CheckError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (no error-severity violations)
/// - 1: Failed (error-severity violations or unparseable stylesheets)
/// - 2: Error (configuration, rule option or I/O error)
/// - 3: Parse error (invalid TOML configuration)
pub fn run_check(
    paths: &[String],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
    config_path: &Path,
    verbose: bool,
) -> i32 {
    match run_check_inner(paths, format, color, config_path, verbose) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_check_inner(
    paths: &[String],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
    config_path: &Path,
    verbose: bool,
) -> Result<bool, CheckError> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config)?;
    let format = resolve_format(format, &config);

    if registry.is_empty() {
        eprintln!("Warning: No rules are enabled. Nothing to check.");
    }

    let files = discover_files(paths, &config, verbose)?;
    if files.is_empty() {
        eprintln!("Warning: No files found to check.");
    }

    if format == OutputFormat::Human {
        eprintln!(
            "Checking {} files with {} rules...",
            files.len(),
            registry.len()
        );
    }

    let engine = ExecutionEngine::new(registry);
    let result = engine.execute(files);

    match format {
        OutputFormat::Human => {
            HumanFormatter::new(resolve_color(color, &config)).write_to_stdout(&result)?
        }
        OutputFormat::Jsonl => JsonlFormatter::new().write_to_stdout(&result),
    }

    Ok(result.passed())
}
