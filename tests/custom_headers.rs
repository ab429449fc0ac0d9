//! Header field tests
//!
//! Tokens carry `alg`, `typ` and `kid` as first-class header fields. Anything
//! else (`cty`, `x5t`, `crit`, application fields) is kept in the header's
//! extra claims, both when issuing and when decoding foreign tokens.

use jwtmint::utils::base64url;
use jwtmint::*;

fn hs256() -> Algorithm {
    Algorithm::hmac256(b"header-secret").unwrap()
}

/// Unsigned-by-us token with an arbitrary header, for decode-only checks
fn foreign_token(header: &str) -> String {
    format!(
        "{}.{}.{}",
        base64url::encode(header),
        base64url::encode(r#"{"iss":"test"}"#),
        base64url::encode("sig")
    )
}

// ============================================================================
// Issued Headers
// ============================================================================

#[test]
fn test_default_header() {
    let token = TokenBuilder::new().sign(&hs256()).unwrap();
    let header = decode(&token).unwrap().header().clone();

    assert_eq!(header.algorithm(), "HS256");
    assert_eq!(header.token_type(), Some("JWT"));
    assert_eq!(header.key_id(), None);
    assert!(header.extra().is_empty());
}

#[test]
fn test_kid_from_algorithm() {
    let algorithm = hs256().with_key_id("signing-key-2024");
    let token = TokenBuilder::new().sign(&algorithm).unwrap();
    assert_eq!(decode(&token).unwrap().key_id(), Some("signing-key-2024"));

    // The key id does not affect which tokens the algorithm verifies
    let decoded = TokenVerifier::new(hs256()).build().verify(&token).unwrap();
    assert_eq!(decoded.key_id(), Some("signing-key-2024"));
}

#[test]
fn test_kid_from_builder_wins() {
    let algorithm = hs256().with_key_id("from-algorithm");
    let token = TokenBuilder::new()
        .with_key_id("from-builder")
        .sign(&algorithm)
        .unwrap();
    assert_eq!(decode(&token).unwrap().key_id(), Some("from-builder"));
}

#[test]
fn test_kid_as_header_claim() {
    let token = TokenBuilder::new()
        .with_header_claim("kid", "header-claim-kid")
        .sign(&hs256().with_key_id("from-algorithm"))
        .unwrap();
    assert_eq!(decode(&token).unwrap().key_id(), Some("header-claim-kid"));
}

#[test]
fn test_typ_override() {
    let token = TokenBuilder::new()
        .with_header_claim("typ", "at+jwt")
        .sign(&hs256())
        .unwrap();
    assert_eq!(
        decode(&token).unwrap().header().token_type(),
        Some("at+jwt")
    );
}

#[test]
fn test_typ_must_be_string() {
    let result = TokenBuilder::new()
        .with_header_claim("typ", 1i64)
        .sign(&hs256());
    assert!(matches!(
        result,
        Err(Error::ClaimTypeMismatch { ref claim, .. }) if claim == "typ"
    ));
}

#[test]
fn test_alg_header_claim_rejected() {
    let result = TokenBuilder::new()
        .with_header_claim("alg", "none")
        .sign(&hs256());
    assert!(matches!(result, Err(Error::Serialization(_))));
}

#[test]
fn test_extra_header_claims_in_order() {
    let token = TokenBuilder::new()
        .with_header_claim("cty", "JWT")
        .with_header_claim("x5t", "dGh1bWJwcmludA")
        .with_header_claim("crit", vec!["exp"])
        .sign(&hs256().with_key_id("k1"))
        .unwrap();

    let decoded = decode(&token).unwrap();
    assert_eq!(
        decoded.header_segment(),
        base64url::encode(
            r#"{"alg":"HS256","typ":"JWT","kid":"k1","cty":"JWT","x5t":"dGh1bWJwcmludA","crit":["exp"]}"#
        )
    );

    let extra = decoded.header().extra();
    let names: Vec<&str> = extra.names().collect();
    assert_eq!(names, vec!["cty", "x5t", "crit"]);
    assert_eq!(
        extra.claim("crit").unwrap().as_string_list().unwrap(),
        vec!["exp"]
    );
}

#[test]
fn test_header_claims_covered_by_signature() {
    let token = TokenBuilder::new()
        .with_header_claim("cty", "JWT")
        .sign(&hs256())
        .unwrap();
    let (_, rest) = token.split_once('.').unwrap();
    let tampered = format!(
        "{}.{}",
        base64url::encode(r#"{"alg":"HS256","typ":"JWT","cty":"other"}"#),
        rest
    );

    assert_eq!(
        TokenVerifier::new(hs256()).build().verify(&tampered),
        Err(Error::InvalidSignature)
    );
}

// ============================================================================
// Decoded Headers
// ============================================================================

#[test]
fn test_header_without_optional_fields() {
    let decoded = decode(&foreign_token(r#"{"alg":"HS256"}"#)).unwrap();
    let header = decoded.header();

    assert_eq!(header.algorithm(), "HS256");
    assert_eq!(header.token_type(), None);
    assert_eq!(header.key_id(), None);
    assert!(header.extra().is_empty());
}

#[test]
fn test_header_with_x509_fields() {
    let decoded = decode(&foreign_token(
        r#"{"alg":"RS256","x5u":"https://example.com/cert.pem","x5c":["MIIC","MIID"],"x5t#S256":"abc"}"#,
    ))
    .unwrap();
    let extra = decoded.header().extra();

    assert_eq!(
        extra.claim("x5u").unwrap().as_string().unwrap(),
        "https://example.com/cert.pem"
    );
    assert_eq!(
        extra.claim("x5c").unwrap().as_string_list().unwrap(),
        vec!["MIIC", "MIID"]
    );
    assert!(extra.contains("x5t#S256"));
}

#[test]
fn test_header_with_nested_object() {
    let decoded = decode(&foreign_token(
        r#"{"alg":"HS256","app":{"tenant":"acme","version":3}}"#,
    ))
    .unwrap();
    let app = decoded.header().extra().claim("app").unwrap().as_map().unwrap();

    assert_eq!(app.claim("tenant").unwrap().as_string().unwrap(), "acme");
    assert_eq!(app.claim("version").unwrap().as_integer().unwrap(), 3);
}

#[test]
fn test_header_field_order_preserved() {
    let decoded = decode(&foreign_token(
        r#"{"zeta":1,"alg":"HS256","alpha":2,"mid":3}"#,
    ))
    .unwrap();
    let names: Vec<&str> = decoded.header().extra().names().collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_header_with_null_typ() {
    let decoded = decode(&foreign_token(r#"{"alg":"HS256","typ":null}"#)).unwrap();
    assert_eq!(decoded.header().token_type(), None);
}

#[test]
fn test_header_with_non_string_typ() {
    assert!(matches!(
        decode(&foreign_token(r#"{"alg":"HS256","typ":7}"#)),
        Err(Error::MalformedToken(_))
    ));
}

#[test]
fn test_header_is_not_object() {
    for header in [r#""HS256""#, "[]", "null", "42"] {
        assert!(
            matches!(
                decode(&foreign_token(header)),
                Err(Error::MalformedToken(_))
            ),
            "accepted header {header}"
        );
    }
}
