//! Key material shared by the integration tests
#![allow(dead_code)]

use std::sync::OnceLock;

/// DER-encoded RSA key pair
pub struct RsaKeys {
    pub private_pkcs8: Vec<u8>,
    pub public_spki: Vec<u8>,
    pub private_key: rsa::RsaPrivateKey,
}

/// A 2048-bit RSA key, generated once per test binary
#[cfg(feature = "rsa")]
pub fn rsa_keys() -> &'static RsaKeys {
    static KEYS: OnceLock<RsaKeys> = OnceLock::new();
    KEYS.get_or_init(generate_rsa_keys)
}

/// A fresh 2048-bit RSA key
#[cfg(feature = "rsa")]
pub fn generate_rsa_keys() -> RsaKeys {
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate RSA key");

    RsaKeys {
        private_pkcs8: private_key.to_pkcs8_der().unwrap().as_bytes().to_vec(),
        public_spki: private_key
            .to_public_key()
            .to_public_key_der()
            .unwrap()
            .as_bytes()
            .to_vec(),
        private_key,
    }
}

/// DER-encoded EC key pair
pub struct EcKeys {
    pub private_pkcs8: Vec<u8>,
    pub public_spki: Vec<u8>,
}

// SubjectPublicKeyInfo up to the uncompressed point, per named curve
const P256_SPKI_PREFIX: &[u8] = &[
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
    0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
];
const P384_SPKI_PREFIX: &[u8] = &[
    0x30, 0x76, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x22, 0x03, 0x62, 0x00,
];
const P521_SPKI_PREFIX: &[u8] = &[
    0x30, 0x81, 0x9b, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
    0x05, 0x2b, 0x81, 0x04, 0x00, 0x23, 0x03, 0x81, 0x86, 0x00,
];

/// A fresh EC key for ES256, ES384 or ES512
#[cfg(feature = "ecdsa")]
pub fn ec_keys(alg: &str) -> EcKeys {
    use aws_lc_rs::rand::SystemRandom;
    use aws_lc_rs::signature::{
        ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING,
        ECDSA_P521_SHA512_FIXED_SIGNING, EcdsaKeyPair, KeyPair,
    };

    let (signing, spki_prefix) = match alg {
        "ES256" => (&ECDSA_P256_SHA256_FIXED_SIGNING, P256_SPKI_PREFIX),
        "ES384" => (&ECDSA_P384_SHA384_FIXED_SIGNING, P384_SPKI_PREFIX),
        "ES512" => (&ECDSA_P521_SHA512_FIXED_SIGNING, P521_SPKI_PREFIX),
        other => panic!("not an ECDSA algorithm: {other}"),
    };

    let rng = SystemRandom::new();
    let document = EcdsaKeyPair::generate_pkcs8(signing, &rng).unwrap();
    let key_pair = EcdsaKeyPair::from_pkcs8(signing, document.as_ref()).unwrap();

    let mut public_spki = spki_prefix.to_vec();
    public_spki.extend_from_slice(key_pair.public_key().as_ref());

    EcKeys {
        private_pkcs8: document.as_ref().to_vec(),
        public_spki,
    }
}

/// Seconds since the Unix epoch
pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Assemble a token from raw header and payload JSON and raw signature bytes
pub fn raw_token(header: &str, payload: &str, signature: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        jwtmint::utils::base64url::encode(header),
        jwtmint::utils::base64url::encode(payload),
        jwtmint::utils::base64url::encode_bytes(signature)
    )
}
