#![forbid(unsafe_code)]

//! Nestlint: nesting policy checks for SCSS selectors
//!
//! Nestlint scans CSS and SCSS stylesheets, parses the selector of every style
//! rule and reports combinators and chained selectors that should be nested
//! (`always`) or nested selectors that should be flattened (`never`).

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod selector;
pub mod stylesheet;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, NestlintError, ParseError, RuleError};

// Re-export core domain types for convenient access
pub use types::{GlobPattern, ReportMode, RuleId, Severity, Syntax};
