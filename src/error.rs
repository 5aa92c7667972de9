//! Error types for the access control engine.

use std::fmt;

/// A rule entry that failed IP/CIDR validation.
///
/// Raised at parse time only; the configuration loader drops the offending
/// entry and continues, so this never aborts an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The address part is not a well-formed dotted-quad IPv4 address.
    #[error("invalid IPv4 address in rule '{0}'")]
    InvalidAddress(String),

    /// The prefix length is missing, non-numeric, or outside 0-32.
    #[error("invalid prefix length in rule '{0}' (expected 0-32)")]
    InvalidPrefix(String),
}

/// Details of a denied access decision.
///
/// Returned from the controller checkpoints so the host can abort a login or
/// force a logout with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    /// The subject the decision applied to.
    pub username: String,
    /// The client address the decision was made against.
    pub client_ip: String,
    /// Localized message for the user.
    pub message: String,
}

impl AccessDenied {
    /// Create a new access denied record.
    pub fn new(
        username: impl Into<String>,
        client_ip: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            client_ip: client_ip.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "access denied for {} from {}.",
            self.username, self.client_ip
        )
    }
}

impl std::error::Error for AccessDenied {}
