//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! discovering files, building rule registries and resolving output options.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{ColorOption, Config, OutputFormat as ConfigFormat};
use crate::engine::file_walker::{FileEntry, FileWalker, FileWalkerError, WalkResult};
use crate::error::{ConfigError, RuleError};
use crate::rules::RuleRegistry;
use std::io::IsTerminal;
use std::path::Path;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load the configuration file
///
/// # Errors
///
/// Returns `ConfigError::Io` if the file does not exist or cannot be read.
/// Returns `ConfigError::Parse` if it is not valid TOML for the schema.
pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "{} not found. Run 'nestlint init' to create it.",
                path.display()
            ),
        )));
    }

    Config::load(path)
}

/// Discover stylesheets to check
///
/// Walks each path and collects the files that match the include/exclude
/// patterns from the configuration. In verbose mode every skipped entry is
/// reported on stderr.
///
/// # Errors
///
/// Returns `FileWalkerError` if there is an error walking the file system.
pub(crate) fn discover_files(
    paths: &[String],
    config: &Config,
    verbose: bool,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path_str in paths {
        let walker = FileWalker::with_verbose(
            Path::new(path_str),
            &config.nestlint.include,
            &config.nestlint.exclude,
            verbose,
        )?;

        for result in walker.walk_with_skip_info() {
            match result? {
                WalkResult::File(file) => all_files.push(file),
                WalkResult::Skipped { path, reason } => {
                    eprintln!("Skipping {}: {}", path.display(), reason.as_str());
                }
            }
        }
    }

    Ok(all_files)
}

/// Build the rule registry from configuration
///
/// # Errors
///
/// Returns `RuleError` for unknown rules or invalid rule options.
pub(crate) fn build_registry(config: &Config) -> Result<RuleRegistry, RuleError> {
    RuleRegistry::build_from_config(&config.rules)
}

/// Command line format wins over the configured one
pub(crate) fn resolve_format(cli: Option<OutputFormat>, config: &Config) -> OutputFormat {
    cli.unwrap_or(match config.output.format {
        ConfigFormat::Human => OutputFormat::Human,
        ConfigFormat::Jsonl => OutputFormat::Jsonl,
    })
}

/// Resolve the effective color choice for stdout
///
/// `auto` only colors when stdout is a terminal.
pub(crate) fn resolve_color(cli: Option<ColorChoice>, config: &Config) -> termcolor::ColorChoice {
    let choice = cli.unwrap_or(match config.output.color {
        ColorOption::Auto => ColorChoice::Auto,
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
    });

    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}
