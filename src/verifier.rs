//! Token verification
//!
//! A [`TokenVerifier`] is bound to exactly one [`Algorithm`] and a fixed set of
//! claim checks. It is configured once through [`VerifierBuilder`] and then
//! shared; `verify` keeps no state between tokens.
//!
//! Verification stops at the first failure:
//!
//! ```text
//! token string
//!     │ parse (size limits, three segments, Base64URL, JSON objects)
//!     ▼
//! header `alg` == bound algorithm name      ── else AlgorithmMismatch
//!     │
//! `none` only with allow_none_algorithm()   ── else AlgorithmNotPermitted
//!     │
//! signature over `header.payload`           ── else InvalidSignature
//!     │
//! exp, nbf, iat, issuer, audience, required claim values
//!     ▼
//! DecodedToken
//! ```

use crate::algorithm::Algorithm;
use crate::claims::{ClaimValue, ClaimsValidation, SCOPE, epoch_seconds, registered, validate_claims};
use crate::error::{Error, Result};
use crate::token::{DecodedToken, parse};
use std::sync::Arc;
use std::time::SystemTime;

type Clock = Arc<dyn Fn() -> SystemTime + Send + Sync>;

/// Configuration for a [`TokenVerifier`]
///
/// Created by [`TokenVerifier::new`]. Methods take `&mut self` so a builder can be
/// configured step by step or chained on a temporary.
///
/// # Examples
///
/// ```
/// use jwtmint::{Algorithm, TokenVerifier};
///
/// let mut builder = TokenVerifier::new(Algorithm::hmac256(b"secret").unwrap());
/// builder.with_issuers(["accounts.fake.com"]).leeway(30);
/// if cfg!(debug_assertions) {
///     builder.ignore_issued_at();
/// }
/// let verifier = builder.build();
/// ```
#[derive(Clone)]
pub struct VerifierBuilder {
    algorithm: Algorithm,
    validation: ClaimsValidation,
    allow_none: bool,
    clock: Clock,
}

impl VerifierBuilder {
    fn update(&mut self, f: impl FnOnce(ClaimsValidation) -> ClaimsValidation) -> &mut Self {
        self.validation = f(std::mem::take(&mut self.validation));
        self
    }

    /// Replace the claim checks with a prepared [`ClaimsValidation`]
    ///
    /// Later `with_*` and leeway calls refine it.
    pub fn with_validation(&mut self, validation: ClaimsValidation) -> &mut Self {
        self.validation = validation;
        self
    }

    /// Accept only tokens whose issuer is in the list
    ///
    /// An issuer encoded as a list passes when any of its entries is allowed.
    pub fn with_issuers<I, S>(&mut self, issuers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|v| v.require_issuers(issuers))
    }

    /// Accept only tokens whose audience intersects the list
    pub fn with_audiences<I, S>(&mut self, audiences: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|v| v.require_audiences(audiences))
    }

    /// Require this subject (sub claim)
    pub fn with_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.with_claim(registered::SUBJECT, subject.into())
    }

    /// Require this JWT ID (jti claim)
    pub fn with_jwt_id(&mut self, jwt_id: impl Into<String>) -> &mut Self {
        self.with_claim(registered::JWT_ID, jwt_id.into())
    }

    /// Require this scope
    pub fn with_scope(&mut self, scope: impl Into<String>) -> &mut Self {
        self.with_claim(SCOPE, scope.into())
    }

    /// Require a claim to be present with exactly this value
    pub fn with_claim(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> &mut Self {
        let (name, value) = (name.into(), value.into());
        self.update(|v| v.require_claim(name, value))
    }

    /// Configure the checks for tokens built by [`TokenBuilder::scoped`](crate::TokenBuilder::scoped)
    pub fn for_scoped<I, S, A, T>(
        &mut self,
        scope: impl Into<String>,
        issuers: I,
        audiences: A,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        A: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.with_scope(scope)
            .with_issuers(issuers)
            .with_audiences(audiences)
    }

    /// Clock skew tolerance (seconds) for `exp`, `nbf` and `iat`
    pub fn leeway(&mut self, seconds: u64) -> &mut Self {
        self.update(|v| v.leeway(seconds))
    }

    /// Clock skew tolerance (seconds) for `exp` only
    pub fn expires_at_leeway(&mut self, seconds: u64) -> &mut Self {
        self.update(|v| v.expires_at_leeway(seconds))
    }

    /// Clock skew tolerance (seconds) for `nbf` only
    pub fn not_before_leeway(&mut self, seconds: u64) -> &mut Self {
        self.update(|v| v.not_before_leeway(seconds))
    }

    /// Clock skew tolerance (seconds) for `iat` only
    pub fn issued_at_leeway(&mut self, seconds: u64) -> &mut Self {
        self.update(|v| v.issued_at_leeway(seconds))
    }

    /// Skip the issued-at check
    pub fn ignore_issued_at(&mut self) -> &mut Self {
        self.update(ClaimsValidation::no_iat_validation)
    }

    /// Accept `none` tokens when bound to [`Algorithm::none`]
    ///
    /// # Security Warning
    ///
    /// Unsigned tokens can be forged by anyone. This has no effect on verifiers
    /// bound to any other algorithm: they never fall back to `none`.
    pub fn allow_none_algorithm(&mut self) -> &mut Self {
        self.allow_none = true;
        self
    }

    /// Use a different time source for the temporal checks
    pub fn with_clock<F>(&mut self, clock: F) -> &mut Self
    where
        F: Fn() -> SystemTime + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Finish configuration
    pub fn build(&self) -> TokenVerifier {
        TokenVerifier {
            algorithm: self.algorithm.clone(),
            validation: self.validation.clone(),
            allow_none: self.allow_none,
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Verifies tokens signed with one algorithm
///
/// # Examples
///
/// ```
/// use jwtmint::{Algorithm, Error, TokenBuilder, TokenVerifier};
///
/// let algorithm = Algorithm::hmac256(b"secret").unwrap();
/// let token = TokenBuilder::scoped()
///     .with_issuer("accounts.fake.com")
///     .with_audience(["audience"])
///     .with_scope("scope")
///     .sign(&algorithm)
///     .unwrap();
///
/// let verifier = TokenVerifier::new(algorithm)
///     .for_scoped("scope", ["accounts.fake.com"], ["audience"])
///     .build();
/// assert!(verifier.verify(&token).is_ok());
///
/// let other = TokenVerifier::new(Algorithm::hmac256(b"other").unwrap()).build();
/// assert_eq!(other.verify(&token), Err(Error::InvalidSignature));
/// ```
#[derive(Clone)]
pub struct TokenVerifier {
    algorithm: Algorithm,
    validation: ClaimsValidation,
    allow_none: bool,
    clock: Clock,
}

impl TokenVerifier {
    /// Start configuring a verifier bound to `algorithm`
    #[allow(clippy::new_ret_no_self)]
    pub fn new(algorithm: Algorithm) -> VerifierBuilder {
        VerifierBuilder {
            algorithm,
            validation: ClaimsValidation::new(),
            allow_none: false,
            clock: Arc::new(SystemTime::now),
        }
    }

    /// The bound algorithm
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Verify a token and return its decoded form
    pub fn verify(&self, token: &str) -> Result<DecodedToken> {
        match self.run(token) {
            Ok(decoded) => {
                tracing::trace!(algorithm = self.algorithm.name(), "token verified");
                Ok(decoded)
            }
            Err(err) => {
                tracing::debug!(
                    algorithm = self.algorithm.name(),
                    kind = err.kind(),
                    error = %err,
                    "token rejected"
                );
                Err(err)
            }
        }
    }

    fn run(&self, token: &str) -> Result<DecodedToken> {
        let decoded = parse(token)?;

        let expected = self.algorithm.name();
        if decoded.algorithm() != expected {
            return Err(Error::AlgorithmMismatch {
                expected: expected.to_string(),
                found: decoded.algorithm().to_string(),
            });
        }

        if self.algorithm.is_none() && !self.allow_none {
            return Err(Error::AlgorithmNotPermitted);
        }

        self.algorithm
            .verify(decoded.signing_input().as_bytes(), decoded.signature())?;

        let now = epoch_seconds((self.clock)());
        validate_claims(decoded.claims(), &self.validation, now)?;

        Ok(decoded)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &self.algorithm)
            .field("validation", &self.validation)
            .field("allow_none", &self.allow_none)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for VerifierBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierBuilder")
            .field("algorithm", &self.algorithm)
            .field("validation", &self.validation)
            .field("allow_none", &self.allow_none)
            .finish_non_exhaustive()
    }
}
