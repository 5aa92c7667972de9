//! Load a policy from TOML and drive the login checkpoints.
//!
//! Run with: `cargo run --example toml_config`

use login_acl::{
    AccessPolicy, ActiveSession, AuthOutcome, LoginAttempt, LoginController, LogoutNotice,
    MemorySessionStore, RefreshOutcome, StaticPolicySource, TracingAuditSink,
};

const CONFIG: &str = r#"
mode = "whitelist"

[rules]
"*" = "10.0.0.0/8"
alice = ["172.16.0.0/16", "192.168.1.10"]
"#;

fn main() {
    tracing_subscriber::fmt::init();

    let policy = AccessPolicy::from_toml(CONFIG).expect("config should parse");
    let controller = LoginController::new(
        StaticPolicySource::new(policy),
        TracingAuditSink::new("login_acl"),
        MemorySessionStore::new(),
    );

    // A login attempt from outside every configured range.
    let attempt = LoginAttempt {
        username: "alice",
        client_ip: "203.0.113.7",
    };
    match controller.authenticate(&attempt).unwrap() {
        AuthOutcome::Allowed => println!("login allowed"),
        AuthOutcome::Denied(denied) => println!("login aborted: {}", denied.message),
    }

    // A session whose address drifted off the allowed ranges mid-session.
    let session = ActiveSession {
        username: "alice",
        client_ip: "203.0.113.7",
    };
    if let RefreshOutcome::ForceLogout(denied) = controller.refresh(&session).unwrap() {
        println!("forcing logout: {denied}");
    }

    // The logout screen explains what happened, once.
    if let LogoutNotice::AccessRestricted(message) = controller.logout(&session).unwrap() {
        println!("logout notice: {message}");
    }
    assert_eq!(controller.logout(&session).unwrap(), LogoutNotice::None);
}
