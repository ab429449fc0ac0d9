//! Claim sets and claim validation
//!
//! A [`ClaimSet`] is an insertion-ordered map from claim name to [`ClaimValue`].
//! Registered claim names (RFC 7519 Section 4.1) live in [`registered`] and keep
//! their reserved types: strings for `iss`, `sub` and `jti`, a string or string list
//! for `aud`, and timestamps for `exp`, `iat` and `nbf`.

mod validator;
mod value;

pub use validator::ClaimsValidation;
pub(crate) use validator::validate_claims;
pub use value::{Claim, ClaimValue};
pub(crate) use value::{epoch_seconds, from_epoch_seconds};

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use value::values_match;

/// Registered claim names
pub mod registered {
    /// Issuer (iss) - identifies the principal that issued the JWT
    pub const ISSUER: &str = "iss";
    /// Subject (sub) - identifies the principal that is the subject of the JWT
    pub const SUBJECT: &str = "sub";
    /// Audience (aud) - identifies the recipients that the JWT is intended for
    pub const AUDIENCE: &str = "aud";
    /// Expiration Time (exp) - seconds since Unix epoch
    pub const EXPIRES_AT: &str = "exp";
    /// Issued At (iat) - seconds since Unix epoch
    pub const ISSUED_AT: &str = "iat";
    /// Not Before (nbf) - the JWT MUST NOT be accepted before this time
    pub const NOT_BEFORE: &str = "nbf";
    /// JWT ID (jti) - unique identifier for the JWT
    pub const JWT_ID: &str = "jti";

    /// All registered claim names
    pub const ALL: [&str; 7] = [
        ISSUER,
        SUBJECT,
        AUDIENCE,
        EXPIRES_AT,
        ISSUED_AT,
        NOT_BEFORE,
        JWT_ID,
    ];

    /// Registered claims holding a `NumericDate`
    pub(crate) const TIMESTAMPS: [&str; 3] = [EXPIRES_AT, ISSUED_AT, NOT_BEFORE];

    /// Check whether a claim name is registered
    pub fn is_registered(name: &str) -> bool {
        ALL.contains(&name)
    }
}

/// Name of the authorization scope claim required by scoped tokens
pub const SCOPE: &str = "scope";

/// Insertion-ordered claim map
///
/// Names are unique; inserting an existing name replaces its value in place so
/// serialization order stays deterministic.
///
/// Two sets are equal when they hold the same names with matching values, where
/// a timestamp matches the integer of its epoch seconds. A set therefore equals
/// the set decoded from the token it was signed into.
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    claims: IndexMap<String, ClaimValue>,
}

impl PartialEq for ClaimSet {
    fn eq(&self, other: &Self) -> bool {
        self.claims.len() == other.claims.len()
            && self.claims.iter().all(|(name, value)| {
                other
                    .claims
                    .get(name)
                    .is_some_and(|other| values_match(value, other))
            })
    }
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a claim, returning the previous value under that name
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.claims.insert(name.into(), value.into())
    }

    /// Raw value of a claim
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    /// Typed view of a claim
    pub fn claim<'a>(&'a self, name: &str) -> Option<Claim<'a>> {
        self.claims
            .get_key_value(name)
            .map(|(name, value)| Claim::new(name, value))
    }

    /// Check whether a claim is present
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Check whether the set holds no claims
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate claims in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.claims.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Claim names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.claims.keys().map(String::as_str)
    }

    /// Check that registered claims carry their registered types and every
    /// value has a JSON representation
    pub(crate) fn validate_for_signing(&self) -> Result<()> {
        for (name, value) in self.iter() {
            let expected = match name {
                registered::ISSUER | registered::SUBJECT | registered::JWT_ID => {
                    (!matches!(value, ClaimValue::String(_))).then_some("string")
                }
                registered::AUDIENCE => (!matches!(
                    value,
                    ClaimValue::String(_) | ClaimValue::StringList(_)
                ))
                .then_some("string or string list"),
                registered::EXPIRES_AT | registered::ISSUED_AT | registered::NOT_BEFORE => {
                    (!matches!(value, ClaimValue::Timestamp(_) | ClaimValue::Integer(_)))
                        .then_some("timestamp")
                }
                _ => None,
            };

            if let Some(expected) = expected {
                return Err(Error::ClaimTypeMismatch {
                    claim: name.to_string(),
                    expected,
                });
            }

            value.ensure_serializable(name)?;
        }

        Ok(())
    }

    /// Serialize to JSON bytes in insertion order
    pub(crate) fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parse a decoded payload
    ///
    /// Registered `NumericDate` claims become timestamps; fractional seconds
    /// are truncated.
    pub(crate) fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse payload: {e}")))?;

        let serde_json::Value::Object(object) = value else {
            return Err(Error::MalformedToken(
                "payload is not a JSON object".into(),
            ));
        };

        let mut claims = Self::from_json_object(object, 0)?;
        for name in registered::TIMESTAMPS {
            if let Some(value) = claims.claims.get_mut(name) {
                let seconds = match *value {
                    ClaimValue::Integer(seconds) => seconds,
                    ClaimValue::Real(seconds) if seconds.is_finite() => seconds.trunc() as i64,
                    _ => continue,
                };
                if let Some(time) = from_epoch_seconds(seconds) {
                    *value = ClaimValue::Timestamp(time);
                }
            }
        }

        Ok(claims)
    }

    pub(crate) fn from_json_object(
        object: serde_json::Map<String, serde_json::Value>,
        depth: usize,
    ) -> Result<Self> {
        let claims = object
            .into_iter()
            .map(|(name, value)| Ok((name, ClaimValue::from_json(value, depth)?)))
            .collect::<Result<IndexMap<_, _>>>()?;

        Ok(Self { claims })
    }
}

impl Serialize for ClaimSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.claims.len()))?;
        for (name, value) in &self.claims {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for ClaimSet
where
    K: Into<String>,
    V: Into<ClaimValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut claims = ClaimSet::new();
        for (name, value) in iter {
            claims.insert(name, value);
        }
        claims
    }
}
