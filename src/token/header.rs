use crate::claims::{ClaimSet, ClaimValue};
use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Default token type written by the builder
pub const TOKEN_TYPE: &str = "JWT";

const ALGORITHM: &str = "alg";
const TYPE: &str = "typ";
const KEY_ID: &str = "kid";

/// JWT header
///
/// Serialized in a fixed order: `alg`, `typ`, `kid`, then any extra header claims
/// in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    algorithm: String,
    token_type: Option<String>,
    key_id: Option<String>,
    extra: ClaimSet,
}

impl Header {
    /// Header for signing
    ///
    /// `typ` and `kid` may be overridden through the extra claims when they hold
    /// strings; `alg` is owned by the algorithm and cannot be.
    pub(crate) fn for_signing(
        algorithm: &str,
        key_id: Option<&str>,
        extra: &ClaimSet,
    ) -> Result<Self> {
        let mut header = Self {
            algorithm: algorithm.to_string(),
            token_type: Some(TOKEN_TYPE.to_string()),
            key_id: key_id.map(str::to_string),
            extra: ClaimSet::new(),
        };

        for (name, value) in extra.iter() {
            match name {
                ALGORITHM => {
                    return Err(Error::Serialization(
                        "header claim 'alg' is set by the algorithm".into(),
                    ));
                }
                TYPE => header.token_type = Some(header_string(name, value)?),
                KEY_ID => header.key_id = Some(header_string(name, value)?),
                _ => {
                    value.ensure_serializable(name)?;
                    header.extra.insert(name, value.clone());
                }
            }
        }

        Ok(header)
    }

    pub(crate) fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;

        let serde_json::Value::Object(mut object) = value else {
            return Err(Error::MalformedToken("header is not a JSON object".into()));
        };

        let algorithm = match object.shift_remove(ALGORITHM) {
            Some(serde_json::Value::String(alg)) => alg,
            Some(_) => return Err(Error::MalformedToken("'alg' is not a string".into())),
            None => return Err(Error::MalformedToken("header has no 'alg'".into())),
        };
        if algorithm.len() > MAX_ALG_LENGTH {
            return Err(Error::MalformedToken(format!(
                "'alg' exceeds {MAX_ALG_LENGTH} characters"
            )));
        }

        let token_type = optional_string(object.shift_remove(TYPE), TYPE)?;
        let key_id = optional_string(object.shift_remove(KEY_ID), KEY_ID)?;
        let extra = ClaimSet::from_json_object(object, 0)?;

        Ok(Self {
            algorithm,
            token_type,
            key_id,
            extra,
        })
    }

    pub(crate) fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Algorithm name (`alg`)
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Token type (`typ`)
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Key id (`kid`)
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Header claims other than `alg`, `typ` and `kid`
    pub fn extra(&self) -> &ClaimSet {
        &self.extra
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(ALGORITHM, &self.algorithm)?;
        if let Some(token_type) = &self.token_type {
            map.serialize_entry(TYPE, token_type)?;
        }
        if let Some(key_id) = &self.key_id {
            map.serialize_entry(KEY_ID, key_id)?;
        }
        for (name, value) in self.extra.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn header_string(name: &str, value: &ClaimValue) -> Result<String> {
    match value {
        ClaimValue::String(value) => Ok(value.clone()),
        _ => Err(Error::ClaimTypeMismatch {
            claim: name.to_string(),
            expected: "string",
        }),
    }
}

fn optional_string(value: Option<serde_json::Value>, name: &str) -> Result<Option<String>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(Error::MalformedToken(format!("'{name}' is not a string"))),
    }
}
