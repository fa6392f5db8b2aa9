#![forbid(unsafe_code)]

//! Rule definitions and registry

pub mod nest_combinators;
mod registry;
mod rule;

// Re-export core types
pub use nest_combinators::{
    Expectation, Finding, Message, NestOptions, NestingPolicy, SelectorNestCombinators,
};
pub use registry::{BuiltinRule, PLUGIN_NAMESPACE, RuleRegistry, builtin_rules, namespace};
pub use rule::{CheckContext, Rule, Violation};
