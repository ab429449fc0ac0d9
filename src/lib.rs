//! # jwtmint - Issue and verify JSON Web Tokens
//!
//! > Signed, claim-bearing JWTs with a strict verification pipeline.
//!
//! **jwtmint** builds compact JWTs from an ordered set of typed claims, signs them
//! with HMAC, RSA or ECDSA, and verifies them against exactly one algorithm with
//! a fixed set of claim checks.
//!
//! ## Overview
//!
//! A token is `base64url(header).base64url(payload).base64url(signature)`. The
//! header names the algorithm; the payload is a JSON object of claims. Most JWT
//! vulnerabilities come from trusting the header: accepting whatever algorithm it
//! declares (including the unsigned `none`), or reading claims before checking
//! the signature.
//!
//! **jwtmint** binds every verifier to a single [`Algorithm`] that owns its key.
//! A token declaring any other algorithm is rejected before its signature is
//! looked at, and `none` is never a fallback. Claims are only checked once the
//! signature has been verified.
//!
//! ## Quick Start
//!
//! ```
//! use jwtmint::{Algorithm, TokenBuilder, TokenVerifier};
//! use std::time::{Duration, SystemTime};
//!
//! let algorithm = Algorithm::hmac256(b"secret")?;
//!
//! let token = TokenBuilder::scoped()
//!     .with_issuer("accounts.fake.com")
//!     .with_subject("subject")
//!     .with_audience(["audience"])
//!     .with_scope("scope")
//!     .with_issued_at(SystemTime::now() - Duration::from_secs(60))
//!     .with_expires_at(SystemTime::now() + Duration::from_secs(3600))
//!     .with_claim("admin", true)
//!     .sign(&algorithm)?;
//!
//! let verifier = TokenVerifier::new(algorithm)
//!     .for_scoped("scope", ["accounts.fake.com"], ["audience"])
//!     .leeway(30)
//!     .build();
//!
//! let decoded = verifier.verify(&token)?;
//! assert_eq!(decoded.subject(), Some("subject"));
//! assert!(decoded.claim("admin").unwrap().as_boolean()?);
//! # Ok::<(), jwtmint::Error>(())
//! ```
//!
//! ## Verification Flow
//!
//! ```text
//! token string
//!     │ parse: size limits, three segments, Base64URL, JSON
//!     ▼
//! algorithm check: header `alg` must name the bound algorithm
//!     │
//!     ▼
//! signature check over `header.payload`
//!     │
//!     ▼
//! claims: exp, nbf, iat, issuer, audience, required values
//!     │
//!     ▼
//! DecodedToken
//! ```
//!
//! The first failing step decides the [`Error`]; nothing after it runs.
//!
//! ## Algorithm Support
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **RSA** (with `rsa` feature): RS256, RS384, RS512
//! - **ECDSA** (with `ecdsa` feature): ES256, ES384, ES512
//!
//! RSA and ECDSA keys are DER: PKCS#8 for private keys (signing and
//! verification), SubjectPublicKeyInfo for public keys (verification only).
//!
//! ```ignore
//! let signer = Algorithm::rsa256(&pkcs8_der)?;
//! let verifier_only = Algorithm::rsa256_public(&spki_der)?;
//! ```
//!
//! ## Claims
//!
//! Claims are [`ClaimValue`]s: strings, string lists, integers, reals, booleans,
//! timestamps, nested maps and null. Typed access goes through [`Claim`], which
//! fails with [`Error::ClaimTypeMismatch`] rather than converting silently.
//!
//! Builders can require claims before signing: [`TokenBuilder::scoped`] refuses
//! to sign without a `scope`, and [`TokenBuilder::with_required_claims`] takes
//! any set of names.
//!
//! ## Features
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **`rsa`** (default): RSA algorithms (RS256, RS384, RS512)
//! - **`ecdsa`** (default): ECDSA algorithms (ES256, ES384, ES512)
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! A verifier only accepts tokens whose header names its own algorithm. An HS256
//! verifier rejects RS256 and `none` tokens with [`Error::AlgorithmMismatch`].
//!
//! ### "none" Algorithm
//!
//! Unsigned tokens need an explicit opt-in on both sides: the builder through
//! [`TokenBuilder::allow_none_algorithm`] and the verifier, which must itself be
//! bound to [`Algorithm::none`], through
//! [`VerifierBuilder::allow_none_algorithm`].
//!
//! ### Input Limits
//!
//! Tokens over 64KB, headers over 8KB and claims nested more than 16 levels deep
//! are rejected before any further processing.
//!
//! ## Logging
//!
//! Rejections are logged with [`tracing`] at `debug` level, successful signing and
//! verification at `trace` level. Install a subscriber to see them.

// Core modules
pub mod error;
mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;

// Claims and validation
pub mod claims;

// Token types
pub mod token;

// Verifier (main public API)
pub mod verifier;

// ============================================================================
// PUBLIC API
// ============================================================================

// Issuing and verifying
pub use token::{DecodedToken, TokenBuilder, decode};
pub use verifier::{TokenVerifier, VerifierBuilder};

// Supporting types
pub use algorithm::{Algorithm, AlgorithmId};
pub use claims::{Claim, ClaimSet, ClaimValue, ClaimsValidation};
pub use error::{Error, Result};
pub use token::Header;
