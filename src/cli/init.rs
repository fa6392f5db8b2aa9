//! Initialize a nestlint project
//!
//! Writes a starter nestlint.toml into the current directory.

use crate::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

/// Default content for nestlint.toml
pub const DEFAULT_NESTLINT_TOML: &str = r#"[nestlint]
version = "1"

# File patterns to include (defaults to all .scss and .css files)
# include = ["src/**/*.scss"]

# File patterns to exclude
# exclude = ["**/vendor/**"]

[rules]
# "always" asks for combinators and chained selectors to be nested,
# "never" rejects selectors of rules nested inside other rules.
"scss/selector-nest-combinators" = "always"

# Full form:
# "scss/selector-nest-combinators" = { expectation = "always", severity = "warning", report = "last" }

[output]
format = "human"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// What `run_init` did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwrote,
    /// The file already existed and `force` was not set
    Skipped,
}

impl InitOutcome {
    /// Line printed for `path` after running init
    pub fn describe(self, path: &str) -> String {
        match self {
            InitOutcome::Created => format!("Created {}", path),
            InitOutcome::Overwrote => format!("Overwrote {}", path),
            InitOutcome::Skipped => {
                format!("Skipped {} (already exists, use --force to overwrite)", path)
            }
        }
    }
}

/// Write nestlint.toml into the current directory
///
/// An existing file is only replaced when `force` is set.
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    write_config(Path::new(CONFIG_FILE_NAME), force)
}

fn write_config(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    let outcome = match (path.exists(), force) {
        (true, false) => return Ok(InitOutcome::Skipped),
        (true, true) => InitOutcome::Overwrote,
        (false, _) => InitOutcome::Created,
    };

    fs::write(path, DEFAULT_NESTLINT_TOML).map_err(|source| InitError::Write {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("{:?} {}", outcome, path.display());
    Ok(outcome)
}
