use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use crate::utils::der::{self, curves};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, ParsedPublicKey};
use std::sync::Arc;

/// ECDSA key for ES256 (P-256), ES384 (P-384) and ES512 (P-521)
///
/// JWT ECDSA signatures use the fixed-length `R || S` form, not ASN.1 DER,
/// as per RFC 7518 Section 3.4.
#[derive(Clone)]
pub(crate) struct EcdsaKey {
    id: AlgorithmId,
    key_pair: Option<Arc<EcdsaKeyPair>>,
    public_key: Arc<ParsedPublicKey>,
}

impl EcdsaKey {
    /// Build a signing key from a DER-encoded PKCS#8 private key
    ///
    /// The key's curve must match the algorithm.
    pub(crate) fn from_pkcs8(id: AlgorithmId, pkcs8_der: &[u8]) -> Result<Self> {
        let key_pair = EcdsaKeyPair::from_pkcs8(signing_algorithm(id), pkcs8_der)
            .map_err(|e| Error::InvalidKey(format!("{id} PKCS#8 key rejected: {e}")))?;
        let public_key = parse_public_key(id, key_pair.public_key().as_ref())?;

        Ok(Self {
            id,
            key_pair: Some(Arc::new(key_pair)),
            public_key,
        })
    }

    /// Build a verification-only key from a DER SubjectPublicKeyInfo
    ///
    /// The point must lie on the algorithm's curve.
    pub(crate) fn from_public_key_der(id: AlgorithmId, spki_der: &[u8]) -> Result<Self> {
        let curve = match id {
            AlgorithmId::ES384 => curves::P384,
            AlgorithmId::ES512 => curves::P521,
            _ => curves::P256,
        };

        Ok(Self {
            id,
            key_pair: None,
            public_key: parse_public_key(id, &der::ec_public_key(spki_der, curve)?)?,
        })
    }

    pub(crate) fn id(&self) -> AlgorithmId {
        self.id
    }

    pub(crate) fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        let key_pair = self
            .key_pair
            .as_ref()
            .ok_or_else(|| Error::SigningKeyMissing(self.id.to_string()))?;

        let rng = SystemRandom::new();
        let signature = key_pair
            .sign(&rng, signing_input)
            .map_err(|e| Error::SigningFailed(format!("{}: {e}", self.id)))?;

        Ok(signature.as_ref().to_vec())
    }

    pub(crate) fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        self.public_key
            .verify_sig(signing_input, signature)
            .map_err(|_| Error::InvalidSignature)
    }
}

fn verification_algorithm(id: AlgorithmId) -> &'static signature::EcdsaVerificationAlgorithm {
    match id {
        AlgorithmId::ES384 => &signature::ECDSA_P384_SHA384_FIXED,
        AlgorithmId::ES512 => &signature::ECDSA_P521_SHA512_FIXED,
        _ => &signature::ECDSA_P256_SHA256_FIXED,
    }
}

/// Parse an uncompressed SEC1 point for verification
fn parse_public_key(id: AlgorithmId, point: &[u8]) -> Result<Arc<ParsedPublicKey>> {
    ParsedPublicKey::new(verification_algorithm(id), point)
        .map(Arc::new)
        .map_err(|e| Error::InvalidKey(format!("{id} public key rejected: {e}")))
}

fn signing_algorithm(id: AlgorithmId) -> &'static EcdsaSigningAlgorithm {
    match id {
        AlgorithmId::ES384 => &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
        AlgorithmId::ES512 => &signature::ECDSA_P521_SHA512_FIXED_SIGNING,
        _ => &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
    }
}
