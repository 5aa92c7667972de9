//! Subject-to-rules mapping and the wildcard merge.
//!
//! A [`RuleSet`] maps each subject (a username, or [`WILDCARD_SUBJECT`] for
//! all users) to the ordered rules configured for it. The rules a lookup
//! actually applies are the wildcard entry's rules followed by the subject's
//! own: the union, in configuration order.

use std::collections::HashMap;

use crate::rule::{IpRule, WILDCARD_SUBJECT};

/// Validated IP rules keyed by subject.
///
/// # Example
/// ```
/// use login_acl::{IpRule, RuleSet};
///
/// let rules = RuleSet::builder()
///     .global(IpRule::parse("10.0.0.0/8").unwrap())
///     .rule("alice", IpRule::parse("172.16.0.0/16").unwrap())
///     .build();
///
/// // alice gets the global range plus her own
/// assert_eq!(rules.effective_rules("alice").len(), 2);
/// // bob gets only the global range
/// assert_eq!(rules.effective_rules("bob").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    subjects: HashMap<String, Vec<IpRule>>,
}

impl RuleSet {
    /// Create an empty rule set. No subject is restricted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a rule set.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Whether the set contains no rules at all.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The subjects with at least one configured rule.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// The rules configured for exactly this subject key, wildcard excluded.
    pub fn rules_for(&self, subject: &str) -> &[IpRule] {
        self.subjects.get(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The rules applied to a lookup for `subject`: the wildcard entry's
    /// rules followed by the subject's own.
    pub fn effective_rules(&self, subject: &str) -> Vec<&IpRule> {
        let mut rules: Vec<&IpRule> = Vec::new();
        if let Some(global) = self.subjects.get(WILDCARD_SUBJECT) {
            rules.extend(global);
        }
        if subject != WILDCARD_SUBJECT {
            if let Some(own) = self.subjects.get(subject) {
                rules.extend(own);
            }
        }
        rules
    }

    /// Whether any rule applies to this subject at all.
    pub fn restricts(&self, subject: &str) -> bool {
        !self.effective_rules(subject).is_empty()
    }
}

/// Builder for constructing a [`RuleSet`].
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    subjects: HashMap<String, Vec<IpRule>>,
}

impl RuleSetBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a subject. Rules keep their insertion order.
    pub fn rule(mut self, subject: impl Into<String>, rule: IpRule) -> Self {
        self.subjects.entry(subject.into()).or_default().push(rule);
        self
    }

    /// Add multiple rules for a subject.
    pub fn rules(
        mut self,
        subject: impl Into<String>,
        rules: impl IntoIterator<Item = IpRule>,
    ) -> Self {
        self.subjects
            .entry(subject.into())
            .or_default()
            .extend(rules);
        self
    }

    /// Add a rule that applies to every user.
    pub fn global(self, rule: IpRule) -> Self {
        self.rule(WILDCARD_SUBJECT, rule)
    }

    /// Build the rule set.
    pub fn build(self) -> RuleSet {
        RuleSet {
            subjects: self.subjects,
        }
    }
}
