use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use std::sync::Arc;

/// Shared secret for HS256, HS384 and HS512
#[derive(Clone)]
pub(crate) struct HmacKey {
    id: AlgorithmId,
    secret: Arc<[u8]>,
}

impl HmacKey {
    pub(crate) fn new(id: AlgorithmId, secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::InvalidKey("HMAC secret cannot be empty".into()));
        }

        Ok(Self {
            id,
            secret: secret.into(),
        })
    }

    pub(crate) fn id(&self) -> AlgorithmId {
        self.id
    }

    pub(crate) fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::HS384 => compute::<Hmac<Sha384>>(&self.secret, signing_input),
            AlgorithmId::HS512 => compute::<Hmac<Sha512>>(&self.secret, signing_input),
            _ => compute::<Hmac<Sha256>>(&self.secret, signing_input),
        }
    }

    /// Verify signature with constant-time comparison
    pub(crate) fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        let expected = self.sign(signing_input)?;

        if signature.len() != expected.len() {
            return Err(Error::InvalidSignature);
        }

        if constant_time_eq(signature, &expected) {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

fn compute<M: Mac + KeyInit>(secret: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|e| Error::InvalidKey(format!("HMAC secret rejected: {e}")))?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}
