//! SubjectPublicKeyInfo parsing for verification-only algorithms
//!
//! This module uses the RustCrypto `spki` crate to check a DER public key at
//! construction time. The returned bytes are the raw `subjectPublicKey` contents:
//! the PKCS#1 `RSAPublicKey` for RSA and the uncompressed SEC1 point for EC keys,
//! which is what the `aws-lc-rs` verifiers consume.

use crate::error::{Error, Result};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

#[cfg(feature = "rsa")]
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

#[cfg(feature = "ecdsa")]
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Named curve OIDs (RFC 5480)
#[cfg(feature = "ecdsa")]
pub(crate) mod curves {
    use spki::ObjectIdentifier;

    pub(crate) const P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
    pub(crate) const P384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
    pub(crate) const P521: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
}

fn key_error(operation: &str, details: impl std::fmt::Display) -> Error {
    Error::InvalidKey(format!("{operation}: {details}"))
}

fn parse(der: &[u8]) -> Result<SubjectPublicKeyInfoRef<'_>> {
    if der.is_empty() {
        return Err(key_error("public key", "empty DER input"));
    }
    SubjectPublicKeyInfoRef::try_from(der).map_err(|e| key_error("malformed SubjectPublicKeyInfo", e))
}

fn subject_public_key(spki: &SubjectPublicKeyInfoRef<'_>) -> Result<Vec<u8>> {
    spki.subject_public_key
        .as_bytes()
        .filter(|bytes| !bytes.is_empty())
        .map(<[u8]>::to_vec)
        .ok_or_else(|| key_error("public key", "empty or misaligned bit string"))
}

/// Extract the PKCS#1 RSA public key from a DER SubjectPublicKeyInfo
#[cfg(feature = "rsa")]
pub(crate) fn rsa_public_key(der: &[u8]) -> Result<Vec<u8>> {
    let spki = parse(der)?;
    if spki.algorithm.oid != RSA_ENCRYPTION_OID {
        return Err(key_error(
            "unexpected key algorithm",
            format!("expected rsaEncryption, found {}", spki.algorithm.oid),
        ));
    }
    subject_public_key(&spki)
}

/// Extract the EC point from a DER SubjectPublicKeyInfo on the expected curve
#[cfg(feature = "ecdsa")]
pub(crate) fn ec_public_key(der: &[u8], curve: ObjectIdentifier) -> Result<Vec<u8>> {
    let spki = parse(der)?;
    if spki.algorithm.oid != EC_PUBLIC_KEY_OID {
        return Err(key_error(
            "unexpected key algorithm",
            format!("expected id-ecPublicKey, found {}", spki.algorithm.oid),
        ));
    }

    let found = spki
        .algorithm
        .parameters_oid()
        .map_err(|e| key_error("missing named curve", e))?;
    if found != curve {
        return Err(key_error(
            "curve mismatch",
            format!("expected {curve}, found {found}"),
        ));
    }

    subject_public_key(&spki)
}
