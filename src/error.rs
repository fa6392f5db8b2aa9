//! Error types for nestlint
//!
//! This module defines the error types used throughout nestlint, following
//! a hierarchical structure with specific error variants for different
//! error categories.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but holds invalid values
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Option value outside the set the rule accepts
    #[error("Invalid option value \"{value}\" for rule \"{rule}\"")]
    InvalidOption { rule: String, value: String },

    /// Rule not found
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// Invalid rule definition
    #[error("Invalid rule definition: {0}")]
    InvalidDefinition(String),
}

/// Errors raised while scanning stylesheets or parsing selectors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Selector text could not be turned into a tree
    #[error("{message} at offset {offset}")]
    Selector { offset: usize, message: String },

    /// Stylesheet structure is broken
    #[error("{message} at offset {offset}")]
    Stylesheet { offset: usize, message: String },
}

impl ParseError {
    pub(crate) fn selector(offset: usize, message: impl Into<String>) -> Self {
        ParseError::Selector {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn stylesheet(offset: usize, message: impl Into<String>) -> Self {
        ParseError::Stylesheet {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset the error points at
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Selector { offset, .. } | ParseError::Stylesheet { offset, .. } => *offset,
        }
    }

    /// Error message without the offset suffix
    pub fn message(&self) -> &str {
        match self {
            ParseError::Selector { message, .. } | ParseError::Stylesheet { message, .. } => {
                message
            }
        }
    }
}

/// Top-level error type for nestlint
#[derive(Debug, thiserror::Error)]
pub enum NestlintError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Parse error in a stylesheet
    #[error("Parse error in {file}: {source}")]
    Parse { file: PathBuf, source: ParseError },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
