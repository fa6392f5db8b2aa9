#![forbid(unsafe_code)]

//! Selector trees and the selector-string parser

mod node;
mod parser;

pub use node::{Enclosing, NodeId, NodeKind, SelectorNode, SelectorTree, Visit, Walk};
pub use parser::{for_each_group, parse_selector};
