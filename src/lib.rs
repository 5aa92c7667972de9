//! # login-acl
//!
//! IP-based login access control with whitelist/blacklist semantics.
//!
//! The crate implements the access decision engine behind a login gate: a
//! configuration-supplied rule set maps subjects (usernames, or the `"*"`
//! wildcard meaning all users) to IPv4 addresses and CIDR ranges, and a pure
//! decision function resolves whether a client address may proceed.
//!
//! - **Whitelist mode**: access is allowed only if the client address
//!   matches a configured rule for the subject.
//! - **Blacklist mode**: access is allowed unless the client address
//!   matches a configured rule for the subject.
//! - A subject with no applicable rule is unrestricted in *both* modes: an
//!   empty whitelist must not lock everyone out and an empty blacklist must
//!   not lock everyone in.
//!
//! The engine fails open by design. Malformed rule entries are dropped with
//! a diagnostic, a malformed client address matches nothing, a blank
//! username cannot be restricted, and an unknown mode value normalizes to
//! whitelist. A login gate that crashes is worse than one that is
//! occasionally permissive; see the crate's DESIGN notes before changing
//! this trade-off.
//!
//! ## Quick Start
//!
//! ```
//! use login_acl::{AccessMode, AccessPolicy, IpRule, RuleSet};
//!
//! let rules = RuleSet::builder()
//!     // applies to every user
//!     .global(IpRule::parse("10.0.0.0/8").unwrap())
//!     // alice may also come from the office VPN
//!     .rule("alice", IpRule::parse("172.16.0.0/16").unwrap())
//!     .build();
//!
//! let policy = AccessPolicy::new(AccessMode::Whitelist, rules);
//!
//! assert!(policy.decide("alice", "172.16.5.5"));
//! assert!(policy.decide("alice", "10.1.1.1"));
//! assert!(!policy.decide("alice", "203.0.113.7"));
//! // bob has no per-user entry; the global range still applies
//! assert!(policy.decide("bob", "10.1.1.1"));
//! ```
//!
//! ## Configuration
//!
//! Policies load from TOML; rule values are a single IP/CIDR string or a
//! list. Invalid entries are dropped with a logged diagnostic, never a
//! failed load.
//!
//! ```
//! use login_acl::AccessPolicy;
//!
//! let policy = AccessPolicy::from_toml(r#"
//! mode = "blacklist"
//!
//! [rules]
//! mallory = ["192.168.1.1", "198.51.100.0/24"]
//! "#).unwrap();
//!
//! assert!(!policy.decide("mallory", "192.168.1.1"));
//! assert!(policy.decide("mallory", "8.8.8.8"));
//! ```
//!
//! ## Host Integration
//!
//! The engine performs no I/O of its own. Hosts wire it in through the
//! collaborator traits — [`PolicySource`] for configuration,
//! [`AuditSink`] for the denied-access log line, [`SessionStore`] for the
//! `access_restricted` flag — and drive the three checkpoints through a
//! [`LoginController`]:
//!
//! ```
//! use login_acl::{
//!     AccessPolicy, AuthOutcome, LoginAttempt, LoginController, MemorySessionStore,
//!     StaticPolicySource, TracingAuditSink,
//! };
//!
//! let policy = AccessPolicy::from_toml(r#"
//! [rules]
//! alice = "10.0.0.0/24"
//! "#).unwrap();
//!
//! let controller = LoginController::new(
//!     StaticPolicySource::new(policy),
//!     TracingAuditSink::new("login_acl"),
//!     MemorySessionStore::new(),
//! );
//!
//! let attempt = LoginAttempt { username: "alice", client_ip: "203.0.113.7" };
//! match controller.authenticate(&attempt).unwrap() {
//!     AuthOutcome::Allowed => { /* proceed with login */ }
//!     AuthOutcome::Denied(denied) => {
//!         // abort the login and show denied.message
//!         assert!(denied.message.contains("203.0.113.7"));
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod engine;
mod error;
mod host;
mod rule;
mod ruleset;

// Re-export main types
pub use config::{AccessConfig, ConfigError, RuleValue};
pub use controller::{
    ActiveSession, AuthOutcome, LoginAttempt, LoginController, LogoutNotice, RefreshOutcome,
    DEFAULT_DENIED_MESSAGE,
};
pub use engine::AccessPolicy;
pub use error::{AccessDenied, RuleError};
pub use host::{
    AuditSink, MemorySessionStore, NullAuditSink, PolicySource, SessionStore, StaticPolicySource,
    TracingAuditSink,
};
pub use rule::{AccessMode, IpRule, WILDCARD_SUBJECT};
pub use ruleset::{RuleSet, RuleSetBuilder};

/// Prelude module for convenient imports.
///
/// ```
/// use login_acl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{AccessConfig, ConfigError};
    pub use crate::controller::{
        ActiveSession, AuthOutcome, LoginAttempt, LoginController, LogoutNotice, RefreshOutcome,
    };
    pub use crate::engine::AccessPolicy;
    pub use crate::error::{AccessDenied, RuleError};
    pub use crate::host::{AuditSink, PolicySource, SessionStore};
    pub use crate::rule::{AccessMode, IpRule, WILDCARD_SUBJECT};
    pub use crate::ruleset::RuleSet;
}
