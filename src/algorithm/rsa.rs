use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use crate::utils::der;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, KeyPair, ParsedPublicKey, RsaKeyPair};
use std::sync::Arc;

/// RSA PKCS#1 v1.5 key for RS256, RS384 and RS512
///
/// Holds the private key pair when built from PKCS#8 and always holds the
/// parsed public key used for verification.
#[derive(Clone)]
pub(crate) struct RsaKey {
    id: AlgorithmId,
    key_pair: Option<Arc<RsaKeyPair>>,
    public_key: Arc<ParsedPublicKey>,
}

impl RsaKey {
    /// Build a signing key from a DER-encoded PKCS#8 private key
    pub(crate) fn from_pkcs8(id: AlgorithmId, pkcs8_der: &[u8]) -> Result<Self> {
        let key_pair = RsaKeyPair::from_pkcs8(pkcs8_der)
            .map_err(|e| Error::InvalidKey(format!("RSA PKCS#8 key rejected: {e}")))?;
        let public_key = parse_public_key(id, key_pair.public_key().as_ref())?;

        Ok(Self {
            id,
            key_pair: Some(Arc::new(key_pair)),
            public_key,
        })
    }

    /// Build a verification-only key from a DER SubjectPublicKeyInfo
    ///
    /// The modulus and exponent are parsed here; a broken key is `InvalidKey`.
    pub(crate) fn from_public_key_der(id: AlgorithmId, spki_der: &[u8]) -> Result<Self> {
        Ok(Self {
            id,
            key_pair: None,
            public_key: parse_public_key(id, &der::rsa_public_key(spki_der)?)?,
        })
    }

    pub(crate) fn id(&self) -> AlgorithmId {
        self.id
    }

    fn padding(&self) -> &'static dyn signature::RsaEncoding {
        match self.id {
            AlgorithmId::RS384 => &signature::RSA_PKCS1_SHA384,
            AlgorithmId::RS512 => &signature::RSA_PKCS1_SHA512,
            _ => &signature::RSA_PKCS1_SHA256,
        }
    }

    pub(crate) fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        let key_pair = self
            .key_pair
            .as_ref()
            .ok_or_else(|| Error::SigningKeyMissing(self.id.to_string()))?;

        let rng = SystemRandom::new();
        let mut signature = vec![0u8; key_pair.public_modulus_len()];
        key_pair
            .sign(self.padding(), &rng, signing_input, &mut signature)
            .map_err(|e| Error::SigningFailed(format!("{}: {e}", self.id)))?;

        Ok(signature)
    }

    pub(crate) fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        self.public_key
            .verify_sig(signing_input, signature)
            .map_err(|_| Error::InvalidSignature)
    }
}

fn verification_algorithm(id: AlgorithmId) -> &'static dyn signature::VerificationAlgorithm {
    match id {
        AlgorithmId::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
        AlgorithmId::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        _ => &signature::RSA_PKCS1_2048_8192_SHA256,
    }
}

/// Parse a PKCS#1 `RSAPublicKey` for verification
fn parse_public_key(id: AlgorithmId, public_key: &[u8]) -> Result<Arc<ParsedPublicKey>> {
    ParsedPublicKey::new(verification_algorithm(id), public_key)
        .map(Arc::new)
        .map_err(|e| Error::InvalidKey(format!("{id} public key rejected: {e}")))
}
