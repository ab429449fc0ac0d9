//! Signing and verification capabilities
//!
//! An [`Algorithm`] is a named capability that owns its key material and can
//! `sign` a signing input (`header.payload`) and `verify` a signature over it.
//! The set of algorithms is closed:
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **RSA** (with `rsa` feature): RS256, RS384, RS512
//! - **ECDSA** (with `ecdsa` feature): ES256, ES384, ES512
//! - **none**: unsigned tokens, usable only behind an explicit opt-in on both the
//!   [`TokenBuilder`](crate::TokenBuilder) and the [`TokenVerifier`](crate::TokenVerifier)
//!
//! Key material is validated when the capability is constructed, never at
//! sign or verify time.

mod hmac;

#[cfg(feature = "rsa")]
mod rsa;

#[cfg(feature = "ecdsa")]
mod ecdsa;

use crate::error::{Error, Result};

/// Algorithm identifier as written to the `alg` header field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,

    /// RSA PKCS#1 v1.5 with SHA-256
    #[cfg(feature = "rsa")]
    RS256,
    /// RSA PKCS#1 v1.5 with SHA-384
    #[cfg(feature = "rsa")]
    RS384,
    /// RSA PKCS#1 v1.5 with SHA-512
    #[cfg(feature = "rsa")]
    RS512,

    /// ECDSA with P-256 and SHA-256
    #[cfg(feature = "ecdsa")]
    ES256,
    /// ECDSA with P-384 and SHA-384
    #[cfg(feature = "ecdsa")]
    ES384,
    /// ECDSA with P-521 and SHA-512
    #[cfg(feature = "ecdsa")]
    ES512,

    /// Unsigned token
    None,
}

impl AlgorithmId {
    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",

            #[cfg(feature = "rsa")]
            AlgorithmId::RS256 => "RS256",
            #[cfg(feature = "rsa")]
            AlgorithmId::RS384 => "RS384",
            #[cfg(feature = "rsa")]
            AlgorithmId::RS512 => "RS512",

            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES256 => "ES256",
            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES384 => "ES384",
            #[cfg(feature = "ecdsa")]
            AlgorithmId::ES512 => "ES512",

            AlgorithmId::None => "none",
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Clone)]
enum Family {
    Hmac(hmac::HmacKey),
    #[cfg(feature = "rsa")]
    Rsa(rsa::RsaKey),
    #[cfg(feature = "ecdsa")]
    Ecdsa(ecdsa::EcdsaKey),
    None,
}

/// A named signing/verification capability bound to its key material
///
/// Capabilities are immutable and cheap to clone (key material is shared), and
/// safe to use from many builders and verifiers concurrently.
///
/// # Examples
///
/// ```
/// use jwtmint::Algorithm;
///
/// let algorithm = Algorithm::hmac256(b"secret").unwrap();
/// let signature = algorithm.sign(b"header.payload").unwrap();
/// assert!(algorithm.verify(b"header.payload", &signature).is_ok());
/// assert_eq!(algorithm.name(), "HS256");
/// ```
#[derive(Clone)]
pub struct Algorithm {
    family: Family,
    key_id: Option<String>,
}

impl Algorithm {
    fn from_family(family: Family) -> Self {
        Self {
            family,
            key_id: None,
        }
    }

    /// HS256 with the given shared secret
    pub fn hmac256(secret: impl AsRef<[u8]>) -> Result<Self> {
        hmac::HmacKey::new(AlgorithmId::HS256, secret.as_ref())
            .map(|key| Self::from_family(Family::Hmac(key)))
    }

    /// HS384 with the given shared secret
    pub fn hmac384(secret: impl AsRef<[u8]>) -> Result<Self> {
        hmac::HmacKey::new(AlgorithmId::HS384, secret.as_ref())
            .map(|key| Self::from_family(Family::Hmac(key)))
    }

    /// HS512 with the given shared secret
    pub fn hmac512(secret: impl AsRef<[u8]>) -> Result<Self> {
        hmac::HmacKey::new(AlgorithmId::HS512, secret.as_ref())
            .map(|key| Self::from_family(Family::Hmac(key)))
    }

    /// RS256 from a DER-encoded PKCS#8 private key (signs and verifies)
    #[cfg(feature = "rsa")]
    pub fn rsa256(pkcs8_der: &[u8]) -> Result<Self> {
        rsa::RsaKey::from_pkcs8(AlgorithmId::RS256, pkcs8_der)
            .map(|key| Self::from_family(Family::Rsa(key)))
    }

    /// RS384 from a DER-encoded PKCS#8 private key (signs and verifies)
    #[cfg(feature = "rsa")]
    pub fn rsa384(pkcs8_der: &[u8]) -> Result<Self> {
        rsa::RsaKey::from_pkcs8(AlgorithmId::RS384, pkcs8_der)
            .map(|key| Self::from_family(Family::Rsa(key)))
    }

    /// RS512 from a DER-encoded PKCS#8 private key (signs and verifies)
    #[cfg(feature = "rsa")]
    pub fn rsa512(pkcs8_der: &[u8]) -> Result<Self> {
        rsa::RsaKey::from_pkcs8(AlgorithmId::RS512, pkcs8_der)
            .map(|key| Self::from_family(Family::Rsa(key)))
    }

    /// RS256 from a DER SubjectPublicKeyInfo (verification only)
    #[cfg(feature = "rsa")]
    pub fn rsa256_public(spki_der: &[u8]) -> Result<Self> {
        rsa::RsaKey::from_public_key_der(AlgorithmId::RS256, spki_der)
            .map(|key| Self::from_family(Family::Rsa(key)))
    }

    /// RS384 from a DER SubjectPublicKeyInfo (verification only)
    #[cfg(feature = "rsa")]
    pub fn rsa384_public(spki_der: &[u8]) -> Result<Self> {
        rsa::RsaKey::from_public_key_der(AlgorithmId::RS384, spki_der)
            .map(|key| Self::from_family(Family::Rsa(key)))
    }

    /// RS512 from a DER SubjectPublicKeyInfo (verification only)
    #[cfg(feature = "rsa")]
    pub fn rsa512_public(spki_der: &[u8]) -> Result<Self> {
        rsa::RsaKey::from_public_key_der(AlgorithmId::RS512, spki_der)
            .map(|key| Self::from_family(Family::Rsa(key)))
    }

    /// ES256 from a DER-encoded PKCS#8 P-256 private key (signs and verifies)
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa256(pkcs8_der: &[u8]) -> Result<Self> {
        ecdsa::EcdsaKey::from_pkcs8(AlgorithmId::ES256, pkcs8_der)
            .map(|key| Self::from_family(Family::Ecdsa(key)))
    }

    /// ES384 from a DER-encoded PKCS#8 P-384 private key (signs and verifies)
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa384(pkcs8_der: &[u8]) -> Result<Self> {
        ecdsa::EcdsaKey::from_pkcs8(AlgorithmId::ES384, pkcs8_der)
            .map(|key| Self::from_family(Family::Ecdsa(key)))
    }

    /// ES512 from a DER-encoded PKCS#8 P-521 private key (signs and verifies)
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa512(pkcs8_der: &[u8]) -> Result<Self> {
        ecdsa::EcdsaKey::from_pkcs8(AlgorithmId::ES512, pkcs8_der)
            .map(|key| Self::from_family(Family::Ecdsa(key)))
    }

    /// ES256 from a DER SubjectPublicKeyInfo on P-256 (verification only)
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa256_public(spki_der: &[u8]) -> Result<Self> {
        ecdsa::EcdsaKey::from_public_key_der(AlgorithmId::ES256, spki_der)
            .map(|key| Self::from_family(Family::Ecdsa(key)))
    }

    /// ES384 from a DER SubjectPublicKeyInfo on P-384 (verification only)
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa384_public(spki_der: &[u8]) -> Result<Self> {
        ecdsa::EcdsaKey::from_public_key_der(AlgorithmId::ES384, spki_der)
            .map(|key| Self::from_family(Family::Ecdsa(key)))
    }

    /// ES512 from a DER SubjectPublicKeyInfo on P-521 (verification only)
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa512_public(spki_der: &[u8]) -> Result<Self> {
        ecdsa::EcdsaKey::from_public_key_der(AlgorithmId::ES512, spki_der)
            .map(|key| Self::from_family(Family::Ecdsa(key)))
    }

    /// The unsigned `none` algorithm
    ///
    /// # Security Warning
    ///
    /// Tokens "signed" with `none` carry no integrity protection. Builders and
    /// verifiers refuse this capability unless explicitly told to accept it.
    pub fn none() -> Self {
        Self::from_family(Family::None)
    }

    /// Attach a key id, written to the `kid` header of tokens signed with this capability
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Key id of the signing key, if any
    pub fn signing_key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Algorithm identifier
    pub fn id(&self) -> AlgorithmId {
        match &self.family {
            Family::Hmac(key) => key.id(),
            #[cfg(feature = "rsa")]
            Family::Rsa(key) => key.id(),
            #[cfg(feature = "ecdsa")]
            Family::Ecdsa(key) => key.id(),
            Family::None => AlgorithmId::None,
        }
    }

    /// Name as written to the `alg` header field (e.g. "HS256", "none")
    pub fn name(&self) -> &'static str {
        self.id().as_str()
    }

    /// Check whether this is the unsigned `none` capability
    pub fn is_none(&self) -> bool {
        matches!(self.family, Family::None)
    }

    /// Sign the signing input (`header.payload`)
    ///
    /// The `none` capability returns an empty signature.
    pub fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        match &self.family {
            Family::Hmac(key) => key.sign(signing_input),
            #[cfg(feature = "rsa")]
            Family::Rsa(key) => key.sign(signing_input),
            #[cfg(feature = "ecdsa")]
            Family::Ecdsa(key) => key.sign(signing_input),
            Family::None => Ok(Vec::new()),
        }
    }

    /// Verify a raw signature over the signing input
    ///
    /// The `none` capability accepts only an empty signature.
    pub fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        match &self.family {
            Family::Hmac(key) => key.verify(signing_input, signature),
            #[cfg(feature = "rsa")]
            Family::Rsa(key) => key.verify(signing_input, signature),
            #[cfg(feature = "ecdsa")]
            Family::Ecdsa(key) => key.verify(signing_input, signature),
            Family::None if signature.is_empty() => Ok(()),
            Family::None => Err(Error::InvalidSignature),
        }
    }
}

impl std::fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Algorithm")
            .field("name", &self.name())
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::hmac256(b"k").unwrap().name(), "HS256");
        assert_eq!(Algorithm::hmac384(b"k").unwrap().name(), "HS384");
        assert_eq!(Algorithm::hmac512(b"k").unwrap().name(), "HS512");
        assert_eq!(Algorithm::none().name(), "none");
        assert_eq!(format!("{}", AlgorithmId::HS256), "HS256");
    }

    #[test]
    fn test_none_signs_empty() {
        let none = Algorithm::none();
        assert!(none.is_none());
        assert!(none.sign(b"header.payload").unwrap().is_empty());
        assert!(none.verify(b"header.payload", b"").is_ok());
        assert!(matches!(
            none.verify(b"header.payload", b"sig"),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn test_same_name_different_key() {
        let a = Algorithm::hmac256(b"secret-a").unwrap();
        let b = Algorithm::hmac256(b"secret-b").unwrap();
        let signature = a.sign(b"input").unwrap();
        assert!(a.verify(b"input", &signature).is_ok());
        assert!(b.verify(b"input", &signature).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let algorithm = Algorithm::hmac256(b"super-secret").unwrap().with_key_id("k1");
        let debug = format!("{algorithm:?}");
        assert!(debug.contains("HS256"));
        assert!(debug.contains("k1"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_empty_secret() {
        assert!(matches!(
            Algorithm::hmac256(b""),
            Err(Error::InvalidKey(_))
        ));
    }
}
