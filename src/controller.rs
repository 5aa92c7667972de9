//! Login checkpoint controller.
//!
//! Replaces the original plugin-host hook convention (event names dispatched
//! into mutable argument bags) with typed request and outcome values: the
//! host calls one method per checkpoint and acts on what comes back. The
//! controller loads a fresh policy per call, writes the audit line on denial,
//! and drives the `access_restricted` session flag.

use crate::error::AccessDenied;
use crate::host::{AuditSink, PolicySource, SessionStore};

/// Default user-facing denial message. `{ip}` expands to the client address.
pub const DEFAULT_DENIED_MESSAGE: &str =
    "Access to this account is not allowed from your IP address ({ip}).";

/// Credentials and origin of a login attempt.
#[derive(Debug, Clone)]
pub struct LoginAttempt<'a> {
    /// The username being authenticated.
    pub username: &'a str,
    /// The client address, proxy-aware, as the host resolved it.
    pub client_ip: &'a str,
}

/// Identity and current origin of an established session.
#[derive(Debug, Clone)]
pub struct ActiveSession<'a> {
    /// The session's authenticated username.
    pub username: &'a str,
    /// The client address of the current request.
    pub client_ip: &'a str,
}

/// Outcome of the authenticate checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Let the login proceed.
    Allowed,
    /// Abort the login and show the denial message.
    Denied(AccessDenied),
}

/// Outcome of the session refresh checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The session still satisfies the policy.
    Continue,
    /// The session no longer satisfies the policy; end it.
    ForceLogout(AccessDenied),
}

/// Whether the logout screen should show the restriction warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutNotice {
    /// Nothing to show.
    None,
    /// The session was ended for policy reasons; show this message.
    AccessRestricted(String),
}

/// Drives the access policy at the host's login, refresh, and logout
/// checkpoints.
///
/// # Example
/// ```
/// use login_acl::{
///     AccessPolicy, AuthOutcome, LoginAttempt, LoginController, MemorySessionStore,
///     StaticPolicySource, TracingAuditSink,
/// };
///
/// let policy = AccessPolicy::from_toml(r#"
/// [rules]
/// alice = "10.0.0.0/24"
/// "#).unwrap();
///
/// let controller = LoginController::new(
///     StaticPolicySource::new(policy),
///     TracingAuditSink::new("login_acl"),
///     MemorySessionStore::new(),
/// );
///
/// let outcome = controller
///     .authenticate(&LoginAttempt { username: "alice", client_ip: "10.0.0.5" })
///     .unwrap();
/// assert_eq!(outcome, AuthOutcome::Allowed);
/// ```
pub struct LoginController<P, A, S> {
    policy_source: P,
    audit: A,
    session: S,
    denied_message: String,
}

impl<P, A, S> LoginController<P, A, S>
where
    P: PolicySource,
    A: AuditSink,
    S: SessionStore,
{
    /// Create a controller over the host's collaborators.
    pub fn new(policy_source: P, audit: A, session: S) -> Self {
        Self {
            policy_source,
            audit,
            session,
            denied_message: DEFAULT_DENIED_MESSAGE.to_string(),
        }
    }

    /// Set the localized denial message. `{ip}` expands to the client
    /// address, as the host's translation layer expects.
    pub fn with_denied_message(mut self, message: impl Into<String>) -> Self {
        self.denied_message = message.into();
        self
    }

    fn denied(&self, username: &str, client_ip: &str) -> AccessDenied {
        AccessDenied::new(username, client_ip, self.message_for(client_ip))
    }

    fn message_for(&self, client_ip: &str) -> String {
        self.denied_message.replace("{ip}", client_ip)
    }

    /// The login checkpoint. On denial the host aborts the login and shows
    /// the carried message.
    pub fn authenticate(&self, attempt: &LoginAttempt<'_>) -> Result<AuthOutcome, P::Error> {
        let policy = self.policy_source.policy()?;
        if policy.decide(attempt.username, attempt.client_ip) {
            tracing::trace!(
                username = attempt.username,
                client_ip = attempt.client_ip,
                "login allowed"
            );
            Ok(AuthOutcome::Allowed)
        } else {
            self.audit
                .access_denied(attempt.username, attempt.client_ip);
            Ok(AuthOutcome::Denied(
                self.denied(attempt.username, attempt.client_ip),
            ))
        }
    }

    /// The live-session checkpoint, run on request refresh. Catches sessions
    /// that became non-compliant after login, e.g. the client IP changed.
    /// On denial the `access_restricted` flag is set so the logout screen
    /// can explain what happened.
    pub fn refresh(&self, session: &ActiveSession<'_>) -> Result<RefreshOutcome, P::Error> {
        let policy = self.policy_source.policy()?;
        if policy.decide(session.username, session.client_ip) {
            Ok(RefreshOutcome::Continue)
        } else {
            self.session.set_restricted();
            self.audit
                .access_denied(session.username, session.client_ip);
            Ok(RefreshOutcome::ForceLogout(
                self.denied(session.username, session.client_ip),
            ))
        }
    }

    /// The logout checkpoint. Reads and clears the `access_restricted` flag;
    /// the warning is shown only if the flag was set and the subject is
    /// still denied under the current policy.
    pub fn logout(&self, session: &ActiveSession<'_>) -> Result<LogoutNotice, P::Error> {
        if !self.session.take_restricted() {
            return Ok(LogoutNotice::None);
        }

        let policy = self.policy_source.policy()?;
        if policy.decide(session.username, session.client_ip) {
            Ok(LogoutNotice::None)
        } else {
            Ok(LogoutNotice::AccessRestricted(
                self.message_for(session.client_ip),
            ))
        }
    }
}
