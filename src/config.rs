//! TOML configuration support.
//!
//! # Example TOML Format
//!
//! ```toml
//! mode = "whitelist"
//!
//! [rules]
//! "*" = "10.0.0.0/8"
//! alice = ["172.16.0.0/16", "192.168.1.10"]
//! ```
//!
//! A rule value is a single IP/CIDR string or a list of them. The `"*"` key
//! holds rules applied to every user; its rules are merged with the per-user
//! entry on lookup. Entries that fail validation are dropped with a logged
//! diagnostic rather than failing the load: a typo in one rule must not take
//! the login gate down with it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::engine::AccessPolicy;
use crate::rule::{AccessMode, IpRule};
use crate::ruleset::RuleSet;

/// Raw, unvalidated configuration as the host supplies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// `"whitelist"` or `"blacklist"`; anything else normalizes to whitelist.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Subject (`"*"` or a username) to one or more IP/CIDR strings.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleValue>,
}

fn default_mode() -> String {
    "whitelist".to_string()
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            rules: BTreeMap::new(),
        }
    }
}

/// One rule string or an ordered list of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A single IP/CIDR string.
    One(String),
    /// An ordered list of IP/CIDR strings.
    Many(Vec<String>),
}

impl RuleValue {
    /// View the value as a slice of rule strings.
    pub fn as_slice(&self) -> &[String] {
        match self {
            RuleValue::One(s) => std::slice::from_ref(s),
            RuleValue::Many(v) => v,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// File I/O error.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
}

impl AccessConfig {
    /// Parse configuration from a TOML string.
    ///
    /// # Example
    /// ```
    /// use login_acl::AccessConfig;
    ///
    /// let config = AccessConfig::from_toml(r#"
    /// mode = "blacklist"
    ///
    /// [rules]
    /// alice = "192.168.1.1"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.rules.len(), 1);
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Validate the raw entries and build a policy.
    ///
    /// Invalid rule strings are dropped with a `warn` diagnostic; a subject
    /// whose entries are all invalid ends up unrestricted, exactly as if no
    /// rule had been configured for it.
    pub fn into_policy(self) -> AccessPolicy {
        let mode = AccessMode::parse(&self.mode);

        let mut builder = RuleSet::builder();
        for (subject, value) in &self.rules {
            for spec in value.as_slice() {
                match IpRule::parse(spec) {
                    Ok(rule) => builder = builder.rule(subject.clone(), rule),
                    Err(err) => {
                        tracing::warn!(
                            subject = %subject,
                            rule = %spec,
                            error = %err,
                            "dropping invalid rule entry"
                        );
                    }
                }
            }
        }

        AccessPolicy::new(mode, builder.build())
    }
}

impl AccessPolicy {
    /// Create a policy directly from a TOML configuration string.
    ///
    /// # Example
    /// ```
    /// use login_acl::AccessPolicy;
    ///
    /// let policy = AccessPolicy::from_toml(r#"
    /// mode = "whitelist"
    ///
    /// [rules]
    /// alice = "10.0.0.0/24"
    /// "#).unwrap();
    ///
    /// assert!(policy.decide("alice", "10.0.0.5"));
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(AccessConfig::from_toml(toml_str)?.into_policy())
    }

    /// Create a policy from a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(AccessConfig::from_file(path)?.into_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_and_list_values() {
        let config = AccessConfig::from_toml(
            r#"
mode = "whitelist"

[rules]
"*" = "10.0.0.0/8"
alice = ["172.16.0.0/16", "192.168.1.10"]
"#,
        )
        .unwrap();

        assert_eq!(config.rules["*"].as_slice(), ["10.0.0.0/8"]);
        assert_eq!(
            config.rules["alice"].as_slice(),
            ["172.16.0.0/16", "192.168.1.10"]
        );

        let policy = config.into_policy();
        assert_eq!(policy.rules().effective_rules("alice").len(), 3);
        assert!(policy.decide("alice", "192.168.1.10"));
        assert!(!policy.decide("alice", "203.0.113.7"));
    }

    #[test]
    fn missing_mode_defaults_to_whitelist() {
        let policy = AccessPolicy::from_toml(
            r#"
[rules]
alice = "10.0.0.0/24"
"#,
        )
        .unwrap();
        assert_eq!(policy.mode(), AccessMode::Whitelist);
    }

    #[test]
    fn unknown_mode_normalizes_to_whitelist() {
        let policy = AccessPolicy::from_toml(
            r#"
mode = "greylist"

[rules]
alice = "10.0.0.0/24"
"#,
        )
        .unwrap();
        assert_eq!(policy.mode(), AccessMode::Whitelist);
        assert!(policy.decide("alice", "10.0.0.5"));
        assert!(!policy.decide("alice", "203.0.113.7"));
    }

    #[test]
    fn invalid_entries_are_dropped_not_fatal() {
        let policy = AccessPolicy::from_toml(
            r#"
[rules]
alice = ["999.1.1.1", "10.0.0.0/24", "10.0.0.0/33"]
"#,
        )
        .unwrap();

        // only the valid middle entry survives
        assert_eq!(policy.rules().effective_rules("alice").len(), 1);
        assert!(policy.decide("alice", "10.0.0.5"));
        assert!(!policy.decide("alice", "10.0.1.5"));
    }

    #[test]
    fn all_invalid_entries_leave_subject_unrestricted() {
        let policy = AccessPolicy::from_toml(
            r#"
[rules]
alice = ["999.1.1.1", "not-an-ip"]
"#,
        )
        .unwrap();

        assert!(!policy.rules().restricts("alice"));
        assert!(policy.decide("alice", "203.0.113.7"));
    }

    #[test]
    fn empty_config_is_open() {
        let policy = AccessPolicy::from_toml("").unwrap();
        assert!(policy.rules().is_empty());
        assert!(policy.decide("anyone", "203.0.113.7"));
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(matches!(
            AccessConfig::from_toml("mode = ["),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
