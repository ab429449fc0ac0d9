use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::{DecodedToken, Header};
use crate::utils::base64url;

/// Decode a token without verifying it
///
/// Splits the token into its three segments, decodes the header and payload
/// JSON and the raw signature. Nothing is checked beyond the token structure:
/// do not trust the result. Use [`TokenVerifier`](crate::TokenVerifier) for
/// tokens received from elsewhere.
///
/// # Examples
///
/// ```
/// use jwtmint::{decode, Algorithm, TokenBuilder};
///
/// let token = TokenBuilder::new()
///     .with_subject("user-1")
///     .sign(&Algorithm::hmac256(b"secret").unwrap())
///     .unwrap();
///
/// let decoded = decode(&token).unwrap();
/// assert_eq!(decoded.subject(), Some("user-1"));
/// assert_eq!(decoded.algorithm(), "HS256");
/// ```
pub fn decode(token: &str) -> Result<DecodedToken> {
    parse(token)
}

pub(crate) fn parse(token: &str) -> Result<DecodedToken> {
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let mut segments = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::MalformedToken(
            "expected three dot-separated segments".into(),
        ));
    };

    if header_b64.is_empty() || payload_b64.is_empty() {
        return Err(Error::MalformedToken("empty header or payload segment".into()));
    }

    let header = Header::from_json_bytes(&base64url::decode_bytes(
        header_b64,
        MAX_DECODED_HEADER_SIZE,
    )?)?;
    let claims = ClaimSet::from_json_bytes(&base64url::decode_bytes(
        payload_b64,
        MAX_DECODED_PAYLOAD_SIZE,
    )?)?;
    let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

    Ok(DecodedToken::new(
        token.to_string(),
        header_b64.len(),
        payload_b64.len(),
        header,
        claims,
        signature,
    ))
}
