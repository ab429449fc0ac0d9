//! Verification pipeline benchmarks
//!
//! Decoding cost by payload size, the cost of each claim check on top of the
//! signature, and RSA/ECDSA verification against HS256.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jwtmint::*;
use std::time::{Duration, SystemTime};

fn hs256() -> Algorithm {
    Algorithm::hmac256(b"test-secret-key").unwrap()
}

fn full_token(algorithm: &Algorithm) -> String {
    let now = SystemTime::now();
    TokenBuilder::scoped()
        .with_issuer("https://example.com")
        .with_subject("user123")
        .with_audience(["api"])
        .with_scope("read:messages")
        .with_issued_at(now)
        .with_not_before(now)
        .with_expires_at(now + Duration::from_secs(3600))
        .sign(algorithm)
        .unwrap()
}

fn bench_decode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_size");

    for size in [64usize, 1024, 16384] {
        let token = TokenBuilder::new()
            .with_subject("user123")
            .with_claim("data", "x".repeat(size))
            .sign(&hs256())
            .unwrap();

        group.throughput(Throughput::Bytes(token.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &token, |b, token| {
            b.iter(|| decode(black_box(token)).unwrap());
        });
    }

    group.finish();
}

fn bench_claim_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("claim_checks");
    let token = full_token(&hs256());

    let signature_only = TokenVerifier::new(hs256()).ignore_issued_at().build();
    group.bench_function("signature_only", |b| {
        b.iter(|| signature_only.verify(black_box(&token)).unwrap());
    });

    let temporal = TokenVerifier::new(hs256()).leeway(60).build();
    group.bench_function("temporal", |b| {
        b.iter(|| temporal.verify(black_box(&token)).unwrap());
    });

    let scoped = TokenVerifier::new(hs256())
        .for_scoped("read:messages", ["https://example.com"], ["api"])
        .leeway(60)
        .build();
    group.bench_function("scoped", |b| {
        b.iter(|| scoped.verify(black_box(&token)).unwrap());
    });

    group.finish();
}

fn bench_by_algorithm(c: &mut Criterion) {
    use rsa::pkcs8::EncodePrivateKey;

    let mut group = c.benchmark_group("verify_by_algorithm");

    let rsa_key = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    let rsa_der = rsa_key.to_pkcs8_der().unwrap();

    let rng = aws_lc_rs::rand::SystemRandom::new();
    let ec_der = aws_lc_rs::signature::EcdsaKeyPair::generate_pkcs8(
        &aws_lc_rs::signature::ECDSA_P256_SHA256_FIXED_SIGNING,
        &rng,
    )
    .unwrap();

    let algorithms = [
        ("HS256", hs256()),
        ("RS256", Algorithm::rsa256(rsa_der.as_bytes()).unwrap()),
        ("ES256", Algorithm::ecdsa256(ec_der.as_ref()).unwrap()),
    ];

    for (name, algorithm) in algorithms {
        let token = full_token(&algorithm);
        let verifier = TokenVerifier::new(algorithm).leeway(60).build();

        group.bench_function(name, |b| {
            b.iter(|| verifier.verify(black_box(&token)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_by_size,
    bench_claim_checks,
    bench_by_algorithm
);
criterion_main!(benches);
