//! Configuration file parsing and validation

pub mod nestlint_toml;

pub use nestlint_toml::{
    CONFIG_FILE_NAME, ColorOption, Config, NestlintMeta, OutputConfig, OutputFormat,
    RuleSettings, RuleValue, RulesConfig,
};
