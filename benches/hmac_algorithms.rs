//! HMAC algorithm benchmarks (HS256, HS384, HS512)
//!
//! Compares signing and verification cost across the three hash sizes.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jwtmint::*;
use std::time::{Duration, SystemTime};

fn algorithms() -> Vec<(&'static str, Algorithm)> {
    vec![
        (
            "HS256",
            Algorithm::hmac256(b"test-secret-key-for-hs256").unwrap(),
        ),
        (
            "HS384",
            Algorithm::hmac384(b"test-secret-key-for-hs384-needs-to-be-longer").unwrap(),
        ),
        (
            "HS512",
            Algorithm::hmac512(b"test-secret-key-for-hs512-needs-to-be-even-longer-for-512-bits")
                .unwrap(),
        ),
    ]
}

fn builder() -> TokenBuilder {
    let now = SystemTime::now();
    TokenBuilder::new()
        .with_issuer("https://example.com")
        .with_subject("user123")
        .with_issued_at(now)
        .with_expires_at(now + Duration::from_secs(3600))
}

fn bench_hmac_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_signing");

    for (name, algorithm) in algorithms() {
        group.bench_function(name, |b| {
            b.iter(|| builder().sign(black_box(&algorithm)).unwrap());
        });
    }

    group.finish();
}

fn bench_hmac_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_verification");

    for (name, algorithm) in algorithms() {
        let token = builder().sign(&algorithm).unwrap();
        let verifier = TokenVerifier::new(algorithm)
            .with_issuers(["https://example.com"])
            .build();

        group.bench_function(name, |b| {
            b.iter(|| verifier.verify(black_box(&token)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hmac_signing, bench_hmac_verification);
criterion_main!(benches);
