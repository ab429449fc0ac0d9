//! Claim values and typed access

use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::limits::MAX_CLAIM_DEPTH;
use serde::ser::{Serialize, Serializer};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A single claim value
///
/// The variant fixes which accessor on [`Claim`] is legal. Timestamps are kept
/// with whole-second precision, the precision of the JWT `NumericDate` format.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    String(String),
    StringList(Vec<String>),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    /// Seconds since the epoch
    ///
    /// Serialized as a JSON integer. Only `exp`, `iat` and `nbf` decode back to
    /// this variant; any other timestamp claim decodes as [`ClaimValue::Integer`]
    /// and reads back through [`Claim::as_date`]. [`ClaimSet`] equality treats the
    /// two forms as equal.
    Timestamp(SystemTime),
    Map(ClaimSet),
    Null,
}

impl ClaimValue {
    /// Name of the value's type, as used in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            ClaimValue::String(_) => "string",
            ClaimValue::StringList(_) => "string list",
            ClaimValue::Integer(_) => "integer",
            ClaimValue::Real(_) => "real",
            ClaimValue::Boolean(_) => "boolean",
            ClaimValue::Timestamp(_) => "timestamp",
            ClaimValue::Map(_) => "map",
            ClaimValue::Null => "null",
        }
    }

    /// Reject values that have no JSON representation (NaN, infinities)
    pub(crate) fn ensure_serializable(&self, name: &str) -> Result<()> {
        match self {
            ClaimValue::Real(value) if !value.is_finite() => Err(Error::Serialization(format!(
                "claim '{name}' holds a non-finite real value"
            ))),
            ClaimValue::Map(map) => map
                .iter()
                .try_for_each(|(key, value)| value.ensure_serializable(key)),
            _ => Ok(()),
        }
    }

    pub(crate) fn from_json(value: serde_json::Value, depth: usize) -> Result<Self> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => ClaimValue::Null,
            Value::Bool(value) => ClaimValue::Boolean(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => ClaimValue::Integer(value),
                None => ClaimValue::Real(number.as_f64().ok_or_else(|| {
                    Error::MalformedToken(format!("unrepresentable number: {number}"))
                })?),
            },
            Value::String(value) => ClaimValue::String(value),
            Value::Array(items) => ClaimValue::StringList(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(value) => Ok(value),
                        other => Err(Error::MalformedToken(format!(
                            "list claims may only hold strings, found {other}"
                        ))),
                    })
                    .collect::<Result<_>>()?,
            ),
            Value::Object(object) => {
                if depth >= MAX_CLAIM_DEPTH {
                    return Err(Error::MalformedToken(format!(
                        "claims nested deeper than {MAX_CLAIM_DEPTH} levels"
                    )));
                }
                ClaimValue::Map(ClaimSet::from_json_object(object, depth + 1)?)
            }
        })
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ClaimValue::String(value) => serializer.serialize_str(value),
            ClaimValue::StringList(values) => values.serialize(serializer),
            ClaimValue::Integer(value) => serializer.serialize_i64(*value),
            ClaimValue::Real(value) => serializer.serialize_f64(*value),
            ClaimValue::Boolean(value) => serializer.serialize_bool(*value),
            ClaimValue::Timestamp(value) => serializer.serialize_i64(epoch_seconds(*value)),
            ClaimValue::Map(map) => map.serialize(serializer),
            ClaimValue::Null => serializer.serialize_unit(),
        }
    }
}

/// Seconds since the Unix epoch, truncated; negative before the epoch
pub(crate) fn epoch_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before) => {
            let before = before.duration();
            // -1.5s truncates toward zero to -1s, matching integer division
            i64::try_from(before.as_secs())
                .map(|secs| -secs)
                .unwrap_or(i64::MIN)
        }
    }
}

pub(crate) fn from_epoch_seconds(seconds: i64) -> Option<SystemTime> {
    if seconds >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(seconds.unsigned_abs()))
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(seconds.unsigned_abs()))
    }
}

/// Compare a configured claim value with a decoded one
///
/// Timestamps travel as integers, so a custom timestamp claim decodes as an
/// integer; both forms compare equal at second precision.
pub(crate) fn values_match(expected: &ClaimValue, actual: &ClaimValue) -> bool {
    match (expected, actual) {
        (ClaimValue::Timestamp(a), ClaimValue::Timestamp(b)) => epoch_seconds(*a) == epoch_seconds(*b),
        (ClaimValue::Timestamp(time), ClaimValue::Integer(seconds))
        | (ClaimValue::Integer(seconds), ClaimValue::Timestamp(time)) => {
            epoch_seconds(*time) == *seconds
        }
        _ => expected == actual,
    }
}

fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    from_epoch_seconds(epoch_seconds(time)).unwrap_or(time)
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(values: Vec<String>) -> Self {
        ClaimValue::StringList(values)
    }
}

impl From<Vec<&str>> for ClaimValue {
    fn from(values: Vec<&str>) -> Self {
        ClaimValue::StringList(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ClaimValue {
    fn from(values: &[&str]) -> Self {
        ClaimValue::StringList(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(value.into())
    }
}

impl From<u32> for ClaimValue {
    fn from(value: u32) -> Self {
        ClaimValue::Integer(value.into())
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Real(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Boolean(value)
    }
}

impl From<SystemTime> for ClaimValue {
    fn from(value: SystemTime) -> Self {
        ClaimValue::Timestamp(truncate_to_seconds(value))
    }
}

impl From<ClaimSet> for ClaimValue {
    fn from(value: ClaimSet) -> Self {
        ClaimValue::Map(value)
    }
}

/// A named view of a claim value with typed accessors
///
/// Every accessor fails with [`Error::ClaimTypeMismatch`] when the value holds a
/// different type. Two coercions are defined: a single string reads as a
/// one-element list through [`as_string_list`](Self::as_string_list), and an
/// integer (seconds since the epoch) reads as a date through
/// [`as_date`](Self::as_date).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Claim<'a> {
    name: &'a str,
    value: &'a ClaimValue,
}

impl<'a> Claim<'a> {
    pub(crate) fn new(name: &'a str, value: &'a ClaimValue) -> Self {
        Self { name, value }
    }

    /// Claim name
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Underlying value
    pub fn value(&self) -> &'a ClaimValue {
        self.value
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::ClaimTypeMismatch {
            claim: self.name.to_string(),
            expected,
        }
    }

    pub fn as_string(&self) -> Result<&'a str> {
        match self.value {
            ClaimValue::String(value) => Ok(value),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn as_string_list(&self) -> Result<Vec<String>> {
        match self.value {
            ClaimValue::StringList(values) => Ok(values.clone()),
            ClaimValue::String(value) => Ok(vec![value.clone()]),
            _ => Err(self.mismatch("string list")),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self.value {
            ClaimValue::Integer(value) => Ok(*value),
            _ => Err(self.mismatch("integer")),
        }
    }

    pub fn as_real(&self) -> Result<f64> {
        match self.value {
            ClaimValue::Real(value) => Ok(*value),
            _ => Err(self.mismatch("real")),
        }
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match self.value {
            ClaimValue::Boolean(value) => Ok(*value),
            _ => Err(self.mismatch("boolean")),
        }
    }

    pub fn as_date(&self) -> Result<SystemTime> {
        match self.value {
            ClaimValue::Timestamp(value) => Ok(*value),
            ClaimValue::Integer(seconds) => {
                from_epoch_seconds(*seconds).ok_or_else(|| self.mismatch("timestamp"))
            }
            _ => Err(self.mismatch("timestamp")),
        }
    }

    pub fn as_map(&self) -> Result<&'a ClaimSet> {
        match self.value {
            ClaimValue::Map(map) => Ok(map),
            _ => Err(self.mismatch("map")),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, ClaimValue::Null)
    }
}
