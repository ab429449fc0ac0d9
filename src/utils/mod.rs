pub mod base64url;

#[cfg(any(feature = "rsa", feature = "ecdsa"))]
pub(crate) mod der;

pub use base64url::{decode_bytes, encode, encode_bytes};
