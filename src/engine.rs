//! The access decision engine.
//!
//! A decision is a pure function of the policy and the request: no I/O, no
//! state across invocations. Every failure mode resolves toward allowing
//! access; an authentication gate that crashes is worse than one that is
//! occasionally permissive. See `decide` for the exact order of checks.

use std::net::Ipv4Addr;

use crate::rule::AccessMode;
use crate::ruleset::RuleSet;

/// An immutable mode + rule set pair, evaluated as a unit.
///
/// Hosts that reload configuration build a fresh policy per evaluation cycle
/// (the [`PolicySource`](crate::PolicySource) contract), so concurrent
/// decisions never observe a half-updated rule set.
///
/// # Example
/// ```
/// use login_acl::{AccessMode, AccessPolicy, IpRule, RuleSet};
///
/// let rules = RuleSet::builder()
///     .rule("alice", IpRule::parse("10.0.0.0/24").unwrap())
///     .build();
/// let policy = AccessPolicy::new(AccessMode::Whitelist, rules);
///
/// assert!(policy.decide("alice", "10.0.0.5"));
/// assert!(!policy.decide("alice", "10.0.1.5"));
/// // no rules configured for bob, so no restriction applies
/// assert!(policy.decide("bob", "10.0.1.5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    mode: AccessMode,
    rules: RuleSet,
}

impl AccessPolicy {
    /// Create a policy from a mode and a validated rule set.
    pub fn new(mode: AccessMode, rules: RuleSet) -> Self {
        Self { mode, rules }
    }

    /// The policy's mode.
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// The policy's rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Decide whether `username` may proceed from `client_ip`.
    ///
    /// Order of checks:
    /// 1. A blank subject cannot be restricted: allow.
    /// 2. No rule configured for this subject: allow. This holds in both
    ///    modes; an empty whitelist must not lock everyone out and an empty
    ///    blacklist must not lock everyone in.
    /// 3. Otherwise, match the client address against the effective rules
    ///    (first match wins) and resolve per the mode. A malformed client
    ///    address matches nothing.
    pub fn decide(&self, username: &str, client_ip: &str) -> bool {
        let username = username.trim();
        if username.is_empty() {
            return true;
        }

        let rules = self.rules.effective_rules(username);
        if rules.is_empty() {
            return true;
        }

        let found = match client_ip.trim().parse::<Ipv4Addr>() {
            Ok(ip) => rules.iter().any(|rule| rule.contains(ip)),
            Err(_) => false,
        };

        let allowed = self.mode.resolve(found);
        tracing::debug!(
            username,
            client_ip,
            mode = %self.mode,
            matched = found,
            allowed,
            "access decision"
        );
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::IpRule;

    fn rule(spec: &str) -> IpRule {
        IpRule::parse(spec).unwrap()
    }

    fn whitelist(rules: RuleSet) -> AccessPolicy {
        AccessPolicy::new(AccessMode::Whitelist, rules)
    }

    fn blacklist(rules: RuleSet) -> AccessPolicy {
        AccessPolicy::new(AccessMode::Blacklist, rules)
    }

    #[test]
    fn blank_subject_is_allowed() {
        let policy = whitelist(RuleSet::builder().global(rule("10.0.0.0/8")).build());
        assert!(policy.decide("", "203.0.113.7"));
        assert!(policy.decide("   ", "203.0.113.7"));
    }

    #[test]
    fn unrestricted_subject_is_allowed_in_both_modes() {
        let rules = RuleSet::builder()
            .rule("alice", rule("10.0.0.0/24"))
            .build();
        assert!(whitelist(rules.clone()).decide("bob", "203.0.113.7"));
        assert!(blacklist(rules).decide("bob", "203.0.113.7"));
    }

    #[test]
    fn empty_rule_set_is_open_in_both_modes() {
        assert!(whitelist(RuleSet::new()).decide("alice", "203.0.113.7"));
        assert!(blacklist(RuleSet::new()).decide("alice", "203.0.113.7"));
    }

    #[test]
    fn whitelist_allows_inside_and_denies_outside() {
        let policy = whitelist(RuleSet::builder().rule("alice", rule("10.0.0.0/24")).build());
        assert!(policy.decide("alice", "10.0.0.5"));
        assert!(!policy.decide("alice", "10.0.1.5"));
    }

    #[test]
    fn blacklist_denies_inside_and_allows_outside() {
        let policy = blacklist(
            RuleSet::builder()
                .rule("alice", rule("192.168.1.1/32"))
                .build(),
        );
        assert!(!policy.decide("alice", "192.168.1.1"));
        assert!(policy.decide("alice", "192.168.1.2"));
        assert!(policy.decide("alice", "8.8.8.8"));
    }

    #[test]
    fn wildcard_and_per_user_rules_union() {
        let rules = RuleSet::builder()
            .global(rule("10.0.0.0/8"))
            .rule("alice", rule("172.16.0.0/16"))
            .build();
        let policy = whitelist(rules);

        // alice may come from either range
        assert!(policy.decide("alice", "172.16.5.5"));
        assert!(policy.decide("alice", "10.1.1.1"));
        assert!(!policy.decide("alice", "203.0.113.7"));

        // bob only gets the global range
        assert!(policy.decide("bob", "10.1.1.1"));
        assert!(!policy.decide("bob", "172.16.5.5"));
    }

    #[test]
    fn malformed_client_address_matches_nothing() {
        let rules = RuleSet::builder().rule("alice", rule("0.0.0.0/0")).build();
        // whitelist: nothing matched, deny
        assert!(!whitelist(rules.clone()).decide("alice", "not-an-ip"));
        // blacklist: nothing matched, allow
        assert!(blacklist(rules).decide("alice", "not-an-ip"));
    }

    #[test]
    fn decisions_are_idempotent() {
        let policy = whitelist(RuleSet::builder().rule("alice", rule("10.0.0.0/24")).build());
        let first = policy.decide("alice", "10.0.0.5");
        for _ in 0..10 {
            assert_eq!(policy.decide("alice", "10.0.0.5"), first);
        }
    }
}
