//! Token builder
//!
//! [`TokenBuilder`] accumulates claims and header fields, then [`sign`](TokenBuilder::sign)
//! checks them and produces the compact token string. Checks run before any
//! cryptographic work, in this order:
//!
//! 1. every mandatory claim is present
//! 2. registered claims hold their registered types
//! 3. the `none` algorithm is only used after [`allow_none_algorithm`](TokenBuilder::allow_none_algorithm)

use crate::algorithm::Algorithm;
use crate::claims::{ClaimSet, ClaimValue, SCOPE, registered};
use crate::error::{Error, Result};
use crate::token::Header;
use crate::utils::base64url;
use indexmap::IndexSet;
use std::time::SystemTime;

/// Single-use JWT builder
///
/// Every `with_*` method takes and returns the builder by value; `sign` consumes it.
/// Setting a claim twice keeps its original position and replaces the value.
///
/// # Examples
///
/// ```
/// use jwtmint::{Algorithm, TokenBuilder};
/// use std::time::{Duration, SystemTime};
///
/// let token = TokenBuilder::scoped()
///     .with_issuer("accounts.fake.com")
///     .with_subject("subject")
///     .with_audience(["audience"])
///     .with_scope("read:messages")
///     .with_expires_at(SystemTime::now() + Duration::from_secs(3600))
///     .sign(&Algorithm::hmac256(b"secret").unwrap())
///     .unwrap();
///
/// assert_eq!(token.split('.').count(), 3);
/// ```
///
/// A scoped builder refuses to sign without a scope:
///
/// ```
/// use jwtmint::{Algorithm, Error, TokenBuilder};
///
/// let result = TokenBuilder::scoped()
///     .with_issuer("accounts.fake.com")
///     .sign(&Algorithm::hmac256(b"secret").unwrap());
///
/// assert_eq!(result, Err(Error::MissingRequiredClaim("scope".into())));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenBuilder {
    claims: ClaimSet,
    header_claims: ClaimSet,
    key_id: Option<String>,
    mandatory: IndexSet<String>,
    allow_none: bool,
}

impl TokenBuilder {
    /// Create a builder with no mandatory claims
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that requires the `scope` claim
    pub fn scoped() -> Self {
        Self::with_required_claims([SCOPE])
    }

    /// Create a builder that requires each of the named claims
    pub fn with_required_claims<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mandatory: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Mark a claim as mandatory
    pub fn require_claim(mut self, name: impl Into<String>) -> Self {
        self.mandatory.insert(name.into());
        self
    }

    /// Set any claim, registered or custom
    ///
    /// Registered names must be given a value of their registered type, which is
    /// checked by [`sign`](Self::sign). `iss` is always issued as a single string,
    /// although the verifier also accepts an issuer list from other issuers.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name, value);
        self
    }

    /// Set the issuer (iss claim)
    pub fn with_issuer(self, issuer: impl Into<String>) -> Self {
        self.with_claim(registered::ISSUER, issuer.into())
    }

    /// Set the subject (sub claim)
    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        self.with_claim(registered::SUBJECT, subject.into())
    }

    /// Set the audience (aud claim)
    ///
    /// A single audience is written as a string, several as a list.
    pub fn with_audience<I, S>(self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut audiences: Vec<String> = audiences.into_iter().map(Into::into).collect();
        let value = match audiences.len() {
            1 => ClaimValue::String(audiences.remove(0)),
            _ => ClaimValue::StringList(audiences),
        };
        self.with_claim(registered::AUDIENCE, value)
    }

    /// Set the expiration time (exp claim)
    pub fn with_expires_at(self, time: SystemTime) -> Self {
        self.with_claim(registered::EXPIRES_AT, time)
    }

    /// Set the issued-at time (iat claim)
    pub fn with_issued_at(self, time: SystemTime) -> Self {
        self.with_claim(registered::ISSUED_AT, time)
    }

    /// Set the not-before time (nbf claim)
    pub fn with_not_before(self, time: SystemTime) -> Self {
        self.with_claim(registered::NOT_BEFORE, time)
    }

    /// Set the JWT ID (jti claim)
    pub fn with_jwt_id(self, jwt_id: impl Into<String>) -> Self {
        self.with_claim(registered::JWT_ID, jwt_id.into())
    }

    /// Set the authorization scope
    pub fn with_scope(self, scope: impl Into<String>) -> Self {
        self.with_claim(SCOPE, scope.into())
    }

    /// Set the `kid` header, overriding the algorithm's signing key id
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Add a header claim
    ///
    /// `typ` and `kid` accept string values; `alg` is always taken from the algorithm.
    pub fn with_header_claim(
        mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Self {
        self.header_claims.insert(name, value);
        self
    }

    /// Permit signing with the `none` algorithm (default: `false`)
    pub fn allow_none_algorithm(mut self, allow: bool) -> Self {
        self.allow_none = allow;
        self
    }

    /// Check the claims and sign the token
    ///
    /// Returns `header.payload.signature`; a token signed with `none` ends with
    /// the separator and an empty signature.
    pub fn sign(self, algorithm: &Algorithm) -> Result<String> {
        match self.encode(algorithm) {
            Ok(token) => {
                tracing::trace!(algorithm = algorithm.name(), "token signed");
                Ok(token)
            }
            Err(err) => {
                tracing::debug!(
                    algorithm = algorithm.name(),
                    kind = err.kind(),
                    error = %err,
                    "token signing rejected"
                );
                Err(err)
            }
        }
    }

    fn encode(&self, algorithm: &Algorithm) -> Result<String> {
        if let Some(missing) = self.mandatory.iter().find(|name| !self.claims.contains(name)) {
            return Err(Error::MissingRequiredClaim(missing.clone()));
        }

        self.claims.validate_for_signing()?;

        if algorithm.is_none() && !self.allow_none {
            return Err(Error::AlgorithmNotPermitted);
        }

        let key_id = self.key_id.as_deref().or(algorithm.signing_key_id());
        let header = Header::for_signing(algorithm.name(), key_id, &self.header_claims)?;

        let mut token = base64url::encode_bytes(&header.to_json_bytes()?);
        token.push('.');
        token.push_str(&base64url::encode_bytes(&self.claims.to_json_bytes()?));

        let signature = algorithm.sign(token.as_bytes())?;
        token.push('.');
        token.push_str(&base64url::encode_bytes(&signature));

        Ok(token)
    }
}
