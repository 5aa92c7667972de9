//! Host collaborator contracts.
//!
//! The engine does not own configuration loading, logging sinks, or session
//! storage; the host supplies them through these traits. Ready-made
//! implementations cover the common cases and tests.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::engine::AccessPolicy;

/// Source of the policy applied to an evaluation cycle.
///
/// Called once per checkpoint, so a reloading host hands out a fresh,
/// fully-built policy each time rather than mutating a shared one.
///
/// # Example
/// ```
/// use login_acl::{AccessPolicy, PolicySource};
///
/// struct FileSource {
///     path: String,
/// }
///
/// impl PolicySource for FileSource {
///     type Error = login_acl::ConfigError;
///
///     fn policy(&self) -> Result<AccessPolicy, Self::Error> {
///         AccessPolicy::from_toml_file(&self.path)
///     }
/// }
/// ```
pub trait PolicySource: Send + Sync {
    /// Error type for policy loading failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a fresh policy.
    fn policy(&self) -> Result<AccessPolicy, Self::Error>;
}

impl<T: PolicySource> PolicySource for Arc<T> {
    type Error = T::Error;

    fn policy(&self) -> Result<AccessPolicy, Self::Error> {
        (**self).policy()
    }
}

/// A source that always serves the same policy.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicySource {
    policy: AccessPolicy,
}

impl StaticPolicySource {
    /// Create a new static policy source.
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }
}

impl PolicySource for StaticPolicySource {
    type Error = Infallible;

    fn policy(&self) -> Result<AccessPolicy, Self::Error> {
        Ok(self.policy.clone())
    }
}

/// Receiver for denied-access audit lines.
pub trait AuditSink: Send + Sync {
    /// Record that `username` was denied access from `client_ip`.
    fn access_denied(&self, username: &str, client_ip: &str);
}

impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    fn access_denied(&self, username: &str, client_ip: &str) {
        (**self).access_denied(username, client_ip)
    }
}

/// Writes the audit line through `tracing` at info level, in the
/// `<plugin>: access denied for <user> from <ip>.` form the host's login
/// log expects.
#[derive(Debug, Clone)]
pub struct TracingAuditSink {
    plugin: String,
}

impl TracingAuditSink {
    /// Create a sink that prefixes lines with the given plugin name.
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
        }
    }
}

impl AuditSink for TracingAuditSink {
    fn access_denied(&self, username: &str, client_ip: &str) {
        tracing::info!(
            "{}: access denied for {} from {}.",
            self.plugin,
            username,
            client_ip
        );
    }
}

/// Discards audit lines.
#[derive(Debug, Clone, Default)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn access_denied(&self, _username: &str, _client_ip: &str) {}
}

/// Host-owned storage for the `access_restricted` session flag.
///
/// The flag is pure UX state: it decides whether the logout screen shows an
/// explanatory warning after a forced logout. It is never an authorization
/// input.
pub trait SessionStore: Send + Sync {
    /// Mark the session as restricted.
    fn set_restricted(&self);

    /// Read the flag and clear it.
    fn take_restricted(&self) -> bool;
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn set_restricted(&self) {
        (**self).set_restricted()
    }

    fn take_restricted(&self) -> bool {
        (**self).take_restricted()
    }
}

/// In-memory session flag, for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    restricted: AtomicBool,
}

impl MemorySessionStore {
    /// Create a new store with the flag cleared.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set_restricted(&self) {
        self.restricted.store(true, Ordering::SeqCst);
    }

    fn take_restricted(&self) -> bool {
        self.restricted.swap(false, Ordering::SeqCst)
    }
}
