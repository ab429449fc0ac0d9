//! Decoded token type
//!
//! A [`DecodedToken`] is what [`TokenVerifier::verify`](crate::TokenVerifier::verify)
//! returns once every check has passed, and what [`decode`](crate::decode) returns
//! without any checks at all.

use crate::claims::{Claim, ClaimSet, ClaimValue, registered};
use crate::token::Header;
use std::time::SystemTime;

/// A JWT split into header, claims and signature
///
/// Keeps the exact string it was parsed from, so the signing input is the
/// original bytes rather than a re-serialization.
///
/// # Examples
///
/// ```
/// use jwtmint::{Algorithm, TokenBuilder, TokenVerifier};
///
/// let algorithm = Algorithm::hmac256(b"secret").unwrap();
/// let token = TokenBuilder::new()
///     .with_issuer("https://issuer.example")
///     .with_audience(["api"])
///     .with_claim("role", "admin")
///     .sign(&algorithm)
///     .unwrap();
///
/// let verifier = TokenVerifier::new(algorithm).build();
/// let decoded = verifier.verify(&token).unwrap();
///
/// assert_eq!(decoded.issuer(), Some("https://issuer.example"));
/// assert_eq!(decoded.audience(), Some(vec!["api".to_string()]));
/// assert_eq!(decoded.claim("role").unwrap().as_string().unwrap(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    token: String,
    header_len: usize,
    payload_len: usize,
    header: Header,
    claims: ClaimSet,
    signature: Vec<u8>,
}

impl DecodedToken {
    pub(crate) fn new(
        token: String,
        header_len: usize,
        payload_len: usize,
        header: Header,
        claims: ClaimSet,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            token,
            header_len,
            payload_len,
            header,
            claims,
            signature,
        }
    }

    /// The token string this was decoded from
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Base64URL header segment
    pub fn header_segment(&self) -> &str {
        &self.token[..self.header_len]
    }

    /// Base64URL payload segment
    pub fn payload_segment(&self) -> &str {
        let start = self.header_len + 1;
        &self.token[start..start + self.payload_len]
    }

    /// Base64URL signature segment (empty for `none` tokens)
    pub fn signature_segment(&self) -> &str {
        &self.token[self.header_len + self.payload_len + 2..]
    }

    /// `header.payload`, the bytes covered by the signature
    pub(crate) fn signing_input(&self) -> &str {
        &self.token[..self.header_len + 1 + self.payload_len]
    }

    /// Get the token header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Algorithm name declared in the header
    pub fn algorithm(&self) -> &str {
        self.header.algorithm()
    }

    /// Key id declared in the header
    pub fn key_id(&self) -> Option<&str> {
        self.header.key_id()
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Get all claims
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Typed view of a claim
    pub fn claim(&self, name: &str) -> Option<Claim<'_>> {
        self.claims.claim(name)
    }

    /// Get the issuer (iss claim) when it is a single string
    pub fn issuer(&self) -> Option<&str> {
        self.string(registered::ISSUER)
    }

    /// Get the subject (sub claim)
    pub fn subject(&self) -> Option<&str> {
        self.string(registered::SUBJECT)
    }

    /// Get the audience (aud claim), a single string read as a one-element list
    pub fn audience(&self) -> Option<Vec<String>> {
        self.claim(registered::AUDIENCE)?.as_string_list().ok()
    }

    /// Get the expiration time (exp claim)
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.date(registered::EXPIRES_AT)
    }

    /// Get the issued-at time (iat claim)
    pub fn issued_at(&self) -> Option<SystemTime> {
        self.date(registered::ISSUED_AT)
    }

    /// Get the not-before time (nbf claim)
    pub fn not_before(&self) -> Option<SystemTime> {
        self.date(registered::NOT_BEFORE)
    }

    /// Get the JWT ID (jti claim)
    pub fn jwt_id(&self) -> Option<&str> {
        self.string(registered::JWT_ID)
    }

    fn string(&self, name: &str) -> Option<&str> {
        match self.claims.get(name)? {
            ClaimValue::String(value) => Some(value),
            _ => None,
        }
    }

    fn date(&self, name: &str) -> Option<SystemTime> {
        self.claim(name)?.as_date().ok()
    }
}
