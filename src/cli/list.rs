//! List command implementation
//!
//! This module implements the `nestlint list` command, which lists every
//! built-in rule with whether the configuration enables it, its primary
//! option and severity.

use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, build_registry, load_config};
use crate::error::{ConfigError, RuleError};
use crate::rules::{RuleRegistry, builtin_rules};
use crate::types::{RuleId, Severity};
use serde::Serialize;
use std::path::Path;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),
}

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub rule: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub description: String,
}

/// Run the list command
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Invalid TOML configuration
pub fn run_list(format: OutputFormat, config_path: &Path) -> i32 {
    match run_list_inner(format, config_path) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                ListError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_list_inner(format: OutputFormat, config_path: &Path) -> Result<(), ListError> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config)?;
    let listings = build_listings(&registry);

    match format {
        OutputFormat::Human => print!("{}", format_human(&listings)),
        OutputFormat::Jsonl => {
            for listing in &listings {
                match serde_json::to_string(listing) {
                    Ok(json) => println!("{}", json),
                    Err(e) => log::warn!("Failed to serialize rule listing: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Combine the built-in rule table with the enabled rules of `registry`
pub fn build_listings(registry: &RuleRegistry) -> Vec<RuleListing> {
    builtin_rules()
        .iter()
        .map(|builtin| {
            let id = builtin.id();
            let enabled = RuleId::new(id.clone()).and_then(|id| registry.get_rule(&id));
            RuleListing {
                rule: id,
                enabled: enabled.is_some(),
                option: enabled.and_then(|rule| rule.primary_option().map(str::to_string)),
                severity: enabled.map(|rule| rule.severity()),
                description: builtin.description.to_string(),
            }
        })
        .collect()
}

fn format_human(listings: &[RuleListing]) -> String {
    let mut output = String::new();
    for listing in listings {
        let state = match (&listing.option, listing.severity) {
            (Some(option), Some(severity)) => format!("{} ({})", option, severity),
            _ if listing.enabled => "enabled".to_string(),
            _ => "disabled".to_string(),
        };
        output.push_str(&format!("{}  {}\n", listing.rule, state));
        output.push_str(&format!("    {}\n", listing.description));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn registry(rules: &str) -> RuleRegistry {
        let config = Config::parse(&format!("[nestlint]\nversion = \"1\"\n[rules]\n{}", rules)).unwrap();
        build_registry(&config).unwrap()
    }

    #[test]
    fn test_listing_enabled_rule() {
        let listings = build_listings(&registry(
            "\"scss/selector-nest-combinators\" = { expectation = \"never\", severity = \"warning\" }",
        ));
        assert_eq!(listings.len(), 1);
        assert!(listings[0].enabled);
        assert_eq!(listings[0].option.as_deref(), Some("never"));
        assert_eq!(listings[0].severity, Some(Severity::Warning));

        let human = format_human(&listings);
        assert!(human.starts_with("scss/selector-nest-combinators  never (warning)\n"));
    }

    #[test]
    fn test_listing_disabled_rule() {
        let listings = build_listings(&registry("\"scss/selector-nest-combinators\" = false"));
        assert!(!listings[0].enabled);
        assert_eq!(listings[0].option, None);

        let json = serde_json::to_string(&listings[0]).unwrap();
        assert!(json.contains("\"enabled\":false"));
        assert!(!json.contains("severity"));
        assert!(format_human(&listings).contains("  disabled\n"));
    }
}
