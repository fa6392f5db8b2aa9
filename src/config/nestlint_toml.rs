//! Parsing and validation for nestlint.toml configuration files

use crate::error::ConfigError;
use crate::types::{GlobPattern, ReportMode, RuleId, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nestlint.toml";

/// Main configuration struct for nestlint.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Nestlint metadata
    pub nestlint: NestlintMeta,

    /// Rule configuration
    #[serde(default)]
    pub rules: RulesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.nestlint.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.nestlint.version
            )));
        }

        // Validate glob patterns by attempting to compile them with globset
        for pattern in &self.nestlint.include {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid include glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for pattern in &self.nestlint.exclude {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

/// Nestlint metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestlintMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// File patterns to include
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    /// File patterns to exclude
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new("**/*.scss"), GlobPattern::new("**/*.css")]
}

/// Rules configuration section, keyed by namespaced rule ID
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesConfig(BTreeMap<RuleId, RuleValue>);

impl RulesConfig {
    pub fn get(&self, rule_id: &RuleId) -> Option<&RuleValue> {
        self.0.get(rule_id)
    }

    /// Configured rules in ID order
    pub fn iter(&self) -> impl Iterator<Item = (&RuleId, &RuleValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RuleId, RuleValue)> for RulesConfig {
    fn from_iter<I: IntoIterator<Item = (RuleId, RuleValue)>>(iter: I) -> Self {
        RulesConfig(iter.into_iter().collect())
    }
}

/// A rule can be switched off, given its primary option, or configured with settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// `false` disables the rule
    Enabled(bool),
    /// Primary option such as `"always"`
    Expectation(String),
    /// Settings table for the rule
    Settings(RuleSettings),
}

/// Settings for individual rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSettings {
    /// Primary option such as `"always"` or `"never"`
    pub expectation: String,

    /// Severity level for this rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// How many diagnostics one selector may produce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportMode>,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorOption::Auto,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
