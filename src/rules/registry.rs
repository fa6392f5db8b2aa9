#![forbid(unsafe_code)]

//! Rule registry for managing and loading rules
//!
//! The RuleRegistry is responsible for:
//! - Knowing which rules are built in
//! - Building the enabled rules from configuration
//! - Providing access to rules by ID

use crate::config::{RuleValue, RulesConfig};
use crate::error::RuleError;
use crate::rules::Rule;
use crate::rules::nest_combinators::{self, SelectorNestCombinators};
use crate::types::RuleId;
use std::collections::BTreeMap;

/// Prefix shared by every built-in rule ID
pub const PLUGIN_NAMESPACE: &str = "scss";

/// Prefix a bare rule name with the plugin namespace
pub fn namespace(rule_name: &str) -> String {
    format!("{}/{}", PLUGIN_NAMESPACE, rule_name)
}

type RuleFactory = fn(&RuleValue) -> Result<Option<Box<dyn Rule>>, RuleError>;

/// A rule shipped with nestlint
#[derive(Clone, Copy)]
pub struct BuiltinRule {
    /// Rule name without namespace
    pub name: &'static str,
    pub description: &'static str,
    factory: RuleFactory,
}

impl BuiltinRule {
    /// Namespaced ID as used in configuration
    pub fn id(&self) -> String {
        namespace(self.name)
    }
}

const BUILTIN_RULES: &[BuiltinRule] = &[BuiltinRule {
    name: nest_combinators::RULE_NAME,
    description: nest_combinators::DESCRIPTION,
    factory: SelectorNestCombinators::from_config,
}];

/// Every rule nestlint knows about, enabled or not
pub fn builtin_rules() -> &'static [BuiltinRule] {
    BUILTIN_RULES
}

/// Registry for storing and managing enabled rules
///
/// Rules are stored as trait objects keyed by ID, so iteration order is stable.
pub struct RuleRegistry {
    rules: BTreeMap<RuleId, Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Build a registry holding every rule the configuration enables
    ///
    /// Rules absent from the configuration or set to `false` stay disabled.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NotFound` for an unknown rule ID and
    /// `RuleError::InvalidOption` for an option the rule does not accept.
    pub fn build_from_config(config: &RulesConfig) -> Result<Self, RuleError> {
        let mut registry = Self::new();

        for (rule_id, value) in config.iter() {
            let builtin = BUILTIN_RULES
                .iter()
                .find(|builtin| builtin.id() == rule_id.as_str())
                .ok_or_else(|| RuleError::NotFound(rule_id.to_string()))?;

            match (builtin.factory)(value)? {
                Some(rule) => registry.register(rule)?,
                None => log::debug!("rule {} is disabled", rule_id),
            }
        }

        Ok(registry)
    }

    /// Add a rule, rejecting duplicate IDs
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError> {
        let rule_id = rule.id().clone();
        if self.rules.contains_key(&rule_id) {
            return Err(RuleError::InvalidDefinition(format!(
                "Duplicate rule ID '{}'",
                rule_id
            )));
        }
        self.rules.insert(rule_id, rule);
        Ok(())
    }

    /// Get a rule by its ID
    ///
    /// Returns `None` if the rule is not enabled.
    pub fn get_rule(&self, id: &RuleId) -> Option<&dyn Rule> {
        self.rules.get(id).map(|boxed| boxed.as_ref())
    }

    /// Iterate over all rules in ID order
    pub fn iter_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.values().map(|boxed| boxed.as_ref())
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSettings;
    use crate::types::{ReportMode, Severity};

    fn rules_config(entries: Vec<(&str, RuleValue)>) -> RulesConfig {
        entries
            .into_iter()
            .map(|(id, value)| (RuleId::new(id).unwrap(), value))
            .collect()
    }

    fn nest_id() -> RuleId {
        RuleId::new("scss/selector-nest-combinators").unwrap()
    }

    #[test]
    fn test_namespace() {
        assert_eq!(namespace("selector-nest-combinators"), "scss/selector-nest-combinators");
    }

    #[test]
    fn test_builtin_rules_listed() {
        let ids: Vec<String> = builtin_rules().iter().map(BuiltinRule::id).collect();
        assert_eq!(ids, vec!["scss/selector-nest-combinators".to_string()]);
    }

    #[test]
    fn test_new_registry() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(RuleRegistry::default().is_empty());
    }

    #[test]
    fn test_build_enables_configured_rule() {
        let config = rules_config(vec![(
            "scss/selector-nest-combinators",
            RuleValue::Expectation("always".to_string()),
        )]);
        let registry = RuleRegistry::build_from_config(&config).unwrap();

        assert_eq!(registry.len(), 1);
        let rule = registry.get_rule(&nest_id()).unwrap();
        assert_eq!(rule.primary_option(), Some("always"));
        assert_eq!(rule.severity(), Severity::Error);
    }

    #[test]
    fn test_build_with_settings() {
        let config = rules_config(vec![(
            "scss/selector-nest-combinators",
            RuleValue::Settings(RuleSettings {
                expectation: "never".to_string(),
                severity: Some(Severity::Warning),
                report: Some(ReportMode::Last),
            }),
        )]);
        let registry = RuleRegistry::build_from_config(&config).unwrap();

        let rule = registry.get_rule(&nest_id()).unwrap();
        assert_eq!(rule.primary_option(), Some("never"));
        assert_eq!(rule.severity(), Severity::Warning);
    }

    #[test]
    fn test_build_disabled_rule() {
        let config = rules_config(vec![(
            "scss/selector-nest-combinators",
            RuleValue::Enabled(false),
        )]);
        let registry = RuleRegistry::build_from_config(&config).unwrap();
        assert!(registry.is_empty());

        let empty = RuleRegistry::build_from_config(&RulesConfig::default()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_build_unknown_rule() {
        let config = rules_config(vec![(
            "selector-nest-combinators",
            RuleValue::Expectation("always".to_string()),
        )]);
        let err = RuleRegistry::build_from_config(&config).err().unwrap();
        assert!(matches!(err, RuleError::NotFound(ref id) if id == "selector-nest-combinators"));
    }

    #[test]
    fn test_build_invalid_option() {
        let config = rules_config(vec![(
            "scss/selector-nest-combinators",
            RuleValue::Expectation("sometimes".to_string()),
        )]);
        let err = RuleRegistry::build_from_config(&config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid option value \"sometimes\" for rule \"scss/selector-nest-combinators\""
        );
    }

    #[test]
    fn test_register_duplicate() {
        let config = rules_config(vec![(
            "scss/selector-nest-combinators",
            RuleValue::Expectation("always".to_string()),
        )]);
        let mut registry = RuleRegistry::build_from_config(&config).unwrap();
        let again =
            SelectorNestCombinators::from_config(&RuleValue::Expectation("never".to_string()))
                .unwrap()
                .unwrap();

        let err = registry.register(again).unwrap_err();
        assert!(err.to_string().contains("Duplicate rule ID"));
        assert_eq!(registry.iter_rules().count(), 1);
    }
}
