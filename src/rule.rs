//! Access mode and IP rule definitions.
//!
//! An [`IpRule`] is one validated entry from a configured rule list: a single
//! IPv4 address or a CIDR range. A bare address is an exact match (`/32`).
//! Matching is network containment: `(ip & netmask) == (network & netmask)`.

use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::RuleError;

/// Subject key whose rules apply to every user.
pub const WILDCARD_SUBJECT: &str = "*";

/// Whitelist or blacklist semantics for a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Access is allowed only if the client address matches a rule.
    #[default]
    Whitelist,
    /// Access is allowed unless the client address matches a rule.
    Blacklist,
}

impl AccessMode {
    /// Parse a mode from a configuration string.
    ///
    /// Anything other than `"blacklist"` (case-insensitive) normalizes to
    /// [`AccessMode::Whitelist`].
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("blacklist") {
            Self::Blacklist
        } else {
            Self::Whitelist
        }
    }

    /// Turn a "client address matched some rule" result into an allow/deny
    /// decision under this mode.
    pub fn resolve(self, found: bool) -> bool {
        match self {
            Self::Whitelist => found,
            Self::Blacklist => !found,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitelist => write!(f, "whitelist"),
            Self::Blacklist => write!(f, "blacklist"),
        }
    }
}

/// A single validated IP/CIDR rule.
///
/// # Example
/// ```
/// use login_acl::IpRule;
///
/// let exact = IpRule::parse("192.168.1.1").unwrap();
/// assert!(exact.matches("192.168.1.1"));
/// assert!(!exact.matches("192.168.1.2"));
///
/// let range = IpRule::parse("10.0.0.0/24").unwrap();
/// assert!(range.matches("10.0.0.200"));
/// assert!(!range.matches("10.0.1.1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRule {
    network: Ipv4Network,
    spec: String,
}

impl IpRule {
    /// Parse a rule from its configuration text, `A.B.C.D` or `A.B.C.D/N`.
    ///
    /// Octets must be 0-255 without leading zeros and the prefix length, if
    /// present, must be 0-32. Anything else is rejected so the loader can
    /// drop the entry with a diagnostic.
    pub fn parse(spec: &str) -> Result<Self, RuleError> {
        let spec = spec.trim();
        let (addr_part, prefix_part) = match spec.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (spec, None),
        };

        let addr: Ipv4Addr = addr_part
            .parse()
            .map_err(|_| RuleError::InvalidAddress(spec.to_string()))?;

        let prefix: u8 = match prefix_part {
            // A bare address is an exact match.
            None => 32,
            Some(p) if !p.is_empty() && p.len() <= 2 => p
                .parse()
                .ok()
                .filter(|n| *n <= 32)
                .ok_or_else(|| RuleError::InvalidPrefix(spec.to_string()))?,
            Some(_) => return Err(RuleError::InvalidPrefix(spec.to_string())),
        };

        let network = Ipv4Network::new(addr, prefix)
            .map_err(|_| RuleError::InvalidPrefix(spec.to_string()))?;

        Ok(Self {
            network,
            spec: spec.to_string(),
        })
    }

    /// The rule text as configured.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// The prefix length of the rule's range (32 for a bare address).
    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Check whether an address falls inside this rule's range.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network.contains(ip)
    }

    /// Check a textual client address. A malformed address never matches.
    pub fn matches(&self, client_ip: &str) -> bool {
        client_ip
            .trim()
            .parse::<Ipv4Addr>()
            .map(|ip| self.contains(ip))
            .unwrap_or(false)
    }
}

impl FromStr for IpRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IpRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address_is_exact_match() {
        let rule = IpRule::parse("127.0.0.1").unwrap();
        assert_eq!(rule.prefix(), 32);
        assert!(rule.matches("127.0.0.1"));
        assert!(!rule.matches("127.0.0.2"));
    }

    #[test]
    fn cidr_containment() {
        let rule = IpRule::parse("10.0.0.0/24").unwrap();
        assert!(rule.matches("10.0.0.5"));
        assert!(rule.matches("10.0.0.255"));
        assert!(!rule.matches("10.0.1.5"));
        assert!(!rule.matches("11.0.0.5"));
    }

    #[test]
    fn zero_prefix_matches_everything() {
        let rule = IpRule::parse("0.0.0.0/0").unwrap();
        assert!(rule.matches("0.0.0.0"));
        assert!(rule.matches("8.8.8.8"));
        assert!(rule.matches("255.255.255.255"));
    }

    #[test]
    fn non_canonical_network_address_still_masks() {
        // 192.168.1.77/24 behaves as 192.168.1.0/24
        let rule = IpRule::parse("192.168.1.77/24").unwrap();
        assert!(rule.matches("192.168.1.1"));
        assert!(!rule.matches("192.168.2.1"));
    }

    #[test]
    fn invalid_addresses_rejected() {
        for spec in [
            "999.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "10.01.1.1",
            "a.b.c.d",
            "",
            "/24",
        ] {
            assert!(
                matches!(IpRule::parse(spec), Err(RuleError::InvalidAddress(_))),
                "expected InvalidAddress for {spec:?}"
            );
        }
    }

    #[test]
    fn invalid_prefixes_rejected() {
        for spec in ["10.0.0.0/33", "10.0.0.0/123", "10.0.0.0/", "10.0.0.0/2x"] {
            assert!(
                matches!(IpRule::parse(spec), Err(RuleError::InvalidPrefix(_))),
                "expected InvalidPrefix for {spec:?}"
            );
        }
    }

    #[test]
    fn malformed_client_address_never_matches() {
        let rule = IpRule::parse("0.0.0.0/0").unwrap();
        assert!(!rule.matches("not-an-ip"));
        assert!(!rule.matches(""));
        assert!(!rule.matches("10.0.0"));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let rule = IpRule::parse("  10.0.0.0/8 ").unwrap();
        assert_eq!(rule.spec(), "10.0.0.0/8");
        assert!(rule.matches(" 10.1.2.3 "));
    }

    #[test]
    fn mode_parse_is_lenient() {
        assert_eq!(AccessMode::parse("blacklist"), AccessMode::Blacklist);
        assert_eq!(AccessMode::parse("Blacklist"), AccessMode::Blacklist);
        assert_eq!(AccessMode::parse("whitelist"), AccessMode::Whitelist);
        assert_eq!(AccessMode::parse("greylist"), AccessMode::Whitelist);
        assert_eq!(AccessMode::parse(""), AccessMode::Whitelist);
    }

    #[test]
    fn mode_resolution() {
        assert!(AccessMode::Whitelist.resolve(true));
        assert!(!AccessMode::Whitelist.resolve(false));
        assert!(!AccessMode::Blacklist.resolve(true));
        assert!(AccessMode::Blacklist.resolve(false));
    }
}
