use crate::claims::value::values_match;
use crate::claims::{ClaimSet, ClaimValue, epoch_seconds, registered};
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Configuration for claims validation
///
/// Checks run in a fixed order and stop at the first failure: `exp`, `nbf`,
/// `iat`, issuer allow-list, audience allow-list, then required claim values.
/// A check that is not configured places no constraint on its claim.
#[derive(Debug, Clone)]
pub struct ClaimsValidation {
    expires_at_leeway: u64,
    not_before_leeway: u64,
    issued_at_leeway: u64,
    validate_iat: bool,
    issuers: Option<Vec<String>>,
    audiences: Option<Vec<String>>,
    required: IndexMap<String, ClaimValue>,
}

impl Default for ClaimsValidation {
    fn default() -> Self {
        Self {
            expires_at_leeway: 0,
            not_before_leeway: 0,
            issued_at_leeway: 0,
            validate_iat: true,
            issuers: None,
            audiences: None,
            required: IndexMap::new(),
        }
    }
}

impl ClaimsValidation {
    /// Create a new validation config with defaults
    ///
    /// No leeway; `exp`, `nbf` and `iat` are checked when present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the same leeway (seconds) for `exp`, `nbf` and `iat`
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.expires_at_leeway = seconds;
        self.not_before_leeway = seconds;
        self.issued_at_leeway = seconds;
        self
    }

    /// Set the leeway (seconds) for `exp` only
    pub fn expires_at_leeway(mut self, seconds: u64) -> Self {
        self.expires_at_leeway = seconds;
        self
    }

    /// Set the leeway (seconds) for `nbf` only
    pub fn not_before_leeway(mut self, seconds: u64) -> Self {
        self.not_before_leeway = seconds;
        self
    }

    /// Set the leeway (seconds) for `iat` only
    pub fn issued_at_leeway(mut self, seconds: u64) -> Self {
        self.issued_at_leeway = seconds;
        self
    }

    /// Disable issued-at validation
    pub fn no_iat_validation(mut self) -> Self {
        self.validate_iat = false;
        self
    }

    /// Accept only tokens whose issuer intersects the given list
    pub fn require_issuers<I, S>(mut self, issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.issuers = Some(issuers.into_iter().map(Into::into).collect());
        self
    }

    /// Accept only tokens whose audience intersects the given list
    pub fn require_audiences<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audiences = Some(audiences.into_iter().map(Into::into).collect());
        self
    }

    /// Require a claim to be present with exactly this value
    pub fn require_claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.required.insert(name.into(), value.into());
        self
    }
}

/// Validate claims according to configuration
///
/// `now` is the current time in seconds since the Unix epoch.
pub(crate) fn validate_claims(
    claims: &ClaimSet,
    config: &ClaimsValidation,
    now: i64,
) -> Result<()> {
    if let Some(exp) = timestamp(claims, registered::EXPIRES_AT)? {
        if now >= exp.saturating_add_unsigned(config.expires_at_leeway) {
            return Err(Error::ExpiredToken {
                expired_at: exp,
                now,
                leeway: config.expires_at_leeway,
            });
        }
    }

    if let Some(nbf) = timestamp(claims, registered::NOT_BEFORE)? {
        if now.saturating_add_unsigned(config.not_before_leeway) < nbf {
            return Err(Error::TokenNotYetValid {
                not_before: nbf,
                now,
                leeway: config.not_before_leeway,
            });
        }
    }

    if config.validate_iat {
        if let Some(iat) = timestamp(claims, registered::ISSUED_AT)? {
            if now.saturating_add_unsigned(config.issued_at_leeway) < iat {
                return Err(Error::TokenIssuedInFuture {
                    issued_at: iat,
                    now,
                    leeway: config.issued_at_leeway,
                });
            }
        }
    }

    if let Some(allowed) = &config.issuers {
        let found = string_list(claims, registered::ISSUER)?;
        if !intersects(&found, allowed) {
            return Err(Error::IssuerRejected {
                found,
                allowed: allowed.clone(),
            });
        }
    }

    if let Some(allowed) = &config.audiences {
        let found = string_list(claims, registered::AUDIENCE)?;
        if !intersects(&found, allowed) {
            return Err(Error::AudienceRejected {
                found,
                allowed: allowed.clone(),
            });
        }
    }

    for (name, expected) in &config.required {
        let actual = claims
            .get(name)
            .ok_or_else(|| Error::MissingRequiredClaim(name.clone()))?;
        if !values_match(expected, actual) {
            return Err(Error::RequiredClaimValueMismatch(name.clone()));
        }
    }

    Ok(())
}

fn timestamp(claims: &ClaimSet, name: &str) -> Result<Option<i64>> {
    match claims.get(name) {
        None => Ok(None),
        Some(ClaimValue::Timestamp(time)) => Ok(Some(epoch_seconds(*time))),
        Some(ClaimValue::Integer(seconds)) => Ok(Some(*seconds)),
        Some(_) => Err(Error::ClaimTypeMismatch {
            claim: name.to_string(),
            expected: "timestamp",
        }),
    }
}

fn string_list(claims: &ClaimSet, name: &str) -> Result<Vec<String>> {
    claims
        .claim(name)
        .ok_or_else(|| Error::MissingRequiredClaim(name.to_string()))?
        .as_string_list()
}

fn intersects(found: &[String], allowed: &[String]) -> bool {
    found.iter().any(|value| allowed.contains(value))
}
