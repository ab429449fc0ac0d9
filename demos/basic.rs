//! Basic example: issue a scoped token and verify it
//!
//! 1. Sign a token with `TokenBuilder`, which refuses to sign without a scope
//! 2. Configure a `TokenVerifier` bound to the same algorithm
//! 3. Verify the token and read its claims
//! 4. Watch a tampered and an expired token get rejected
//!
//! Run with `RUST_LOG=jwtmint=trace cargo run --example basic` to see the
//! library's own log lines.

use jwtmint::*;
use std::time::{Duration, SystemTime};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jwtmint=debug")),
        )
        .init();

    println!("=== jwtmint - Basic Example ===\n");

    let algorithm = Algorithm::hmac256(b"your-256-bit-secret-key-here!")?.with_key_id("demo-key");
    let now = SystemTime::now();

    println!("Step 1: Signing token...");
    let token = TokenBuilder::scoped()
        .with_issuer("https://example.com")
        .with_subject("user-12345")
        .with_audience(["my-app"])
        .with_scope("read:messages")
        .with_issued_at(now)
        .with_expires_at(now + Duration::from_secs(3600))
        .with_claim("roles", vec!["admin", "editor"])
        .sign(&algorithm)?;
    println!("  ✓ Token: {}\n", token);

    println!("Step 2: Building verifier...");
    let verifier = TokenVerifier::new(algorithm)
        .for_scoped("read:messages", ["https://example.com"], ["my-app"])
        .leeway(60)
        .build();
    println!("  ✓ Bound to {}\n", verifier.algorithm().name());

    println!("Step 3: Verifying token...");
    let decoded = verifier.verify(&token)?;
    println!("  ✓ Signature verified");
    println!("  ✓ Claims validated\n");

    println!("=== Verified Token Data ===");
    println!("Algorithm: {}", decoded.algorithm());
    println!("Key id: {:?}", decoded.key_id());
    println!("Issuer: {:?}", decoded.issuer());
    println!("Subject: {:?}", decoded.subject());
    println!("Audience: {:?}", decoded.audience());
    println!("Expires at: {:?}", decoded.expires_at());
    if let Some(roles) = decoded.claim("roles") {
        println!("Roles: {:?}", roles.as_string_list()?);
    }

    println!("\nStep 4: Rejections...");
    let (signing_input, _) = token.rsplit_once('.').unwrap_or((&token, ""));
    let tampered = format!("{signing_input}.AAAA");
    match verifier.verify(&tampered) {
        Err(err) => println!("  ✓ Tampered token rejected: {} ({})", err, err.kind()),
        Ok(_) => println!("  ✗ Tampered token accepted"),
    }

    let expired = TokenBuilder::scoped()
        .with_issuer("https://example.com")
        .with_audience(["my-app"])
        .with_scope("read:messages")
        .with_expires_at(now - Duration::from_secs(3600))
        .sign(&Algorithm::hmac256(b"your-256-bit-secret-key-here!")?)?;
    match verifier.verify(&expired) {
        Err(err) => println!("  ✓ Expired token rejected: {} ({})", err, err.kind()),
        Ok(_) => println!("  ✗ Expired token accepted"),
    }

    Ok(())
}
