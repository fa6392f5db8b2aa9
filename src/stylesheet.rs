#![forbid(unsafe_code)]

//! Stylesheet scanning and source positions

mod line_index;
mod scanner;

pub use line_index::LineIndex;
pub use scanner::{RuleParent, StyleRule, Stylesheet, parse_stylesheet};
