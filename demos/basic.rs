//! Build a policy in code and evaluate a few decisions.
//!
//! Run with: `cargo run --example basic`

use login_acl::{AccessMode, AccessPolicy, IpRule, RuleSet};

fn main() {
    tracing_subscriber::fmt::init();

    let rules = RuleSet::builder()
        .global(IpRule::parse("10.0.0.0/8").unwrap())
        .rule("alice", IpRule::parse("172.16.0.0/16").unwrap())
        .rule("bob", IpRule::parse("192.168.1.10").unwrap())
        .build();

    let policy = AccessPolicy::new(AccessMode::Whitelist, rules);

    let checks = [
        ("alice", "172.16.5.5"),
        ("alice", "10.1.1.1"),
        ("alice", "203.0.113.7"),
        ("bob", "192.168.1.10"),
        ("bob", "192.168.1.11"),
        ("carol", "10.99.0.1"),
        ("carol", "203.0.113.7"),
    ];

    for (user, ip) in checks {
        let verdict = if policy.decide(user, ip) {
            "allowed"
        } else {
            "denied"
        };
        println!("{user:>6} from {ip:<15} -> {verdict}");
    }
}
