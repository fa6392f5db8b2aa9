//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for nestlint commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Nestlint CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "nestlint")]
#[command(about = "Enforce or forbid nesting of combinators in SCSS selectors")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides the configuration file)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Available nestlint subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lint stylesheets
    Check {
        /// Paths to check (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Output format (overrides the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Configuration file
        #[arg(short, long, default_value = "nestlint.toml")]
        config: PathBuf,

        /// Report skipped files on stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a nestlint.toml in this directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List enabled rules
    List {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Configuration file
        #[arg(short, long, default_value = "nestlint.toml")]
        config: PathBuf,
    },
}
