#![forbid(unsafe_code)]

//! `selector-nest-combinators`
//!
//! Under `always`, combinators and chained compound components should be
//! written as nested rules instead of inline. Under `never`, any selector of a
//! rule that is itself nested inside another style rule is rejected.

use crate::config::RuleValue;
use crate::error::RuleError;
use crate::rules::registry::namespace;
use crate::rules::rule::{CheckContext, Rule, Violation};
use crate::selector::{Enclosing, NodeId, NodeKind, SelectorTree, Visit, parse_selector};
use crate::stylesheet::RuleParent;
use crate::types::{ReportMode, RuleId, Severity};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const RULE_NAME: &str = "selector-nest-combinators";

pub const DESCRIPTION: &str =
    "Require or disallow nesting of combinators and chained selectors";

/// Selector text ending in a complete `#{...}` interpolation
const TRAILING_INTERPOLATION: &str = r"#\{.+\}$";

/// The rule's primary option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Always,
    Never,
}

impl Expectation {
    pub fn as_str(self) -> &'static str {
        match self {
            Expectation::Always => "always",
            Expectation::Never => "never",
        }
    }
}

impl FromStr for Expectation {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "always" => Ok(Expectation::Always),
            "never" => Ok(Expectation::Never),
            other => Err(RuleError::InvalidOption {
                rule: namespace(RULE_NAME),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic text produced by the policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ExpectedInterpolation,
    Expected { combinator: String, kind: NodeKind },
    Rejected,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::ExpectedInterpolation => {
                f.write_str("Expected interpolation to be in a nested form")
            }
            Message::Expected { combinator, kind } => write!(
                f,
                "Expected combinator \"{}\" of type \"{}\" to be in a nested form",
                combinator, kind
            ),
            Message::Rejected => f.write_str("Unexpected nesting found in selector"),
        }
    }
}

/// A policy violation inside one selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: Message,
    /// Byte offset of the offending node within the selector text
    pub index: usize,
}

/// Decides which nodes of a selector tree violate the configured expectation
#[derive(Debug, Clone)]
pub struct NestingPolicy {
    expectation: Expectation,
    report: ReportMode,
    interpolation: Regex,
}

impl NestingPolicy {
    pub fn new(expectation: Expectation, report: ReportMode) -> Result<Self, RuleError> {
        let interpolation = Regex::new(TRAILING_INTERPOLATION).map_err(|e| {
            RuleError::InvalidDefinition(format!("Invalid interpolation pattern: {}", e))
        })?;
        Ok(Self {
            expectation,
            report,
            interpolation,
        })
    }

    pub fn expectation(&self) -> Expectation {
        self.expectation
    }

    /// Evaluate every node of `tree`, the parse of `selector`, for a rule
    /// enclosed by `parent`
    ///
    /// Findings come out in walk order. With [`ReportMode::Last`] only the
    /// final one is kept.
    pub fn evaluate(&self, tree: &SelectorTree, selector: &str, parent: &RuleParent) -> Vec<Finding> {
        if self.expectation == Expectation::Never && parent.is_top_level() {
            return Vec::new();
        }

        let interpolated = self.interpolation.is_match(selector);
        let mut findings: Vec<Finding> = tree
            .walk()
            .filter_map(|visit| {
                let node = tree.node(visit.id);
                if node.value == "}" {
                    return None;
                }
                let message = match self.expectation {
                    Expectation::Always => expected_nesting(tree, visit, interpolated)?,
                    Expectation::Never => Message::Rejected,
                };
                Some(Finding {
                    message,
                    index: node.source_index,
                })
            })
            .collect();

        if self.report == ReportMode::Last && findings.len() > 1 {
            findings.drain(..findings.len() - 1);
        }
        findings
    }
}

/// The `always` check for one visited node
fn expected_nesting(tree: &SelectorTree, visit: Visit, interpolated: bool) -> Option<Message> {
    let id = visit.id;
    if visit.enclosing == Enclosing::PseudoArgument {
        return None;
    }
    let prev = tree.prev(id)?;
    if precedes_nesting(tree, id) {
        return None;
    }

    let node = tree.node(id);
    match node.kind {
        NodeKind::Combinator => {
            // A missing neighbour never chains
            let next = tree.next(id)?;
            if !tree.kind(next).is_chaining() || !tree.kind(prev).is_chaining() {
                return None;
            }
        }
        NodeKind::Attribute
        | NodeKind::Class
        | NodeKind::Id
        | NodeKind::Pseudo
        | NodeKind::Tag
        | NodeKind::Universal => {
            if !tree.kind(prev).is_chaining() || interpolated {
                return None;
            }
        }
        NodeKind::Comment
        | NodeKind::Nesting
        | NodeKind::Root
        | NodeKind::Selector
        | NodeKind::String => return None,
    }

    Some(if interpolated {
        Message::ExpectedInterpolation
    } else {
        Message::Expected {
            combinator: node.value.clone(),
            kind: node.kind,
        }
    })
}

/// Whether a `&` follows `id` among its siblings
fn precedes_nesting(tree: &SelectorTree, id: NodeId) -> bool {
    tree.following_siblings(id)
        .any(|sibling| tree.kind(sibling) == NodeKind::Nesting)
}

/// Resolved options of [`SelectorNestCombinators`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestOptions {
    pub expectation: Expectation,
    pub severity: Severity,
    pub report: ReportMode,
}

impl NestOptions {
    pub fn new(expectation: Expectation) -> Self {
        Self {
            expectation,
            severity: Severity::default(),
            report: ReportMode::default(),
        }
    }

    /// Resolve options from a configuration value
    ///
    /// Returns `Ok(None)` when the rule is switched off with `false`.
    pub fn from_value(value: &RuleValue) -> Result<Option<Self>, RuleError> {
        match value {
            RuleValue::Enabled(false) => Ok(None),
            RuleValue::Enabled(true) => Err(RuleError::InvalidOption {
                rule: namespace(RULE_NAME),
                value: "true".to_string(),
            }),
            RuleValue::Expectation(raw) => Ok(Some(Self::new(raw.parse()?))),
            RuleValue::Settings(settings) => Ok(Some(Self {
                expectation: settings.expectation.parse()?,
                severity: settings.severity.unwrap_or_default(),
                report: settings.report.unwrap_or_default(),
            })),
        }
    }
}

/// Rule enforcing the nesting policy on every style rule of a stylesheet
#[derive(Debug)]
pub struct SelectorNestCombinators {
    id: RuleId,
    severity: Severity,
    policy: NestingPolicy,
}

impl SelectorNestCombinators {
    pub fn new(options: NestOptions) -> Result<Self, RuleError> {
        let id = RuleId::new(namespace(RULE_NAME)).ok_or_else(|| {
            RuleError::InvalidDefinition(format!("Invalid rule name '{}'", RULE_NAME))
        })?;
        Ok(Self {
            id,
            severity: options.severity,
            policy: NestingPolicy::new(options.expectation, options.report)?,
        })
    }

    /// Build the rule from its configuration entry, None when disabled
    pub fn from_config(value: &RuleValue) -> Result<Option<Box<dyn Rule>>, RuleError> {
        match NestOptions::from_value(value)? {
            Some(options) => Ok(Some(Box::new(Self::new(options)?))),
            None => Ok(None),
        }
    }

    pub fn policy(&self) -> &NestingPolicy {
        &self.policy
    }
}

impl Rule for SelectorNestCombinators {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn primary_option(&self) -> Option<&str> {
        Some(self.policy.expectation().as_str())
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for rule in &ctx.stylesheet.rules {
            let tree = match parse_selector(&rule.selector) {
                Ok(tree) => tree,
                Err(err) => {
                    log::debug!(
                        "{}: cannot parse selector {:?}: {}",
                        ctx.file_path.display(),
                        rule.selector,
                        err
                    );
                    violations.push(ctx.violation(
                        &self.id,
                        Severity::Warning,
                        rule.selector_offset + err.offset(),
                        format!("Cannot parse selector ({})", err.message()),
                        &rule.selector,
                    ));
                    continue;
                }
            };

            for finding in self.policy.evaluate(&tree, &rule.selector, &rule.parent) {
                violations.push(ctx.violation(
                    &self.id,
                    self.severity,
                    rule.selector_offset + finding.index,
                    finding.message.to_string(),
                    &rule.selector,
                ));
            }
        }

        violations
    }
}
