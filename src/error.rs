//! Errors for jwtmint
//!
//! Signing and verification never recover from a failed check: every variant below
//! is returned to the caller so that "expired", "forged" and "malformed" tokens can be
//! told apart when logging or auditing.

use thiserror::Error;

/// JWT signing and verification errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Claim serialization failed: {0}")]
    Serialization(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    /// The `none` algorithm was used without an explicit opt-in
    #[error("None algorithm isn't allowed")]
    AlgorithmNotPermitted,

    #[error("Algorithm mismatch: expected '{expected}', token declares '{found}'")]
    AlgorithmMismatch { expected: String, found: String },

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Algorithm '{0}' was built from a public key and cannot sign")]
    SigningKeyMissing(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    InvalidSignature,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Standard claim '{0}' has not been set")]
    MissingRequiredClaim(String),

    #[error("Claim '{claim}' is not of type {expected}")]
    ClaimTypeMismatch {
        claim: String,
        expected: &'static str,
    },

    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    ExpiredToken {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    TokenNotYetValid {
        not_before: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    TokenIssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Issuer {found:?} not accepted. Allowed: {allowed:?}")]
    IssuerRejected {
        found: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("Audience {found:?} not accepted. Allowed: {allowed:?}")]
    AudienceRejected {
        found: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("Claim '{0}' does not hold the required value")]
    RequiredClaimValueMismatch(String),
}

/// Result type alias for jwtmint operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short, stable name of the error kind for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::TokenTooLarge { .. } => "token_too_large",
            Error::MalformedToken(_) => "malformed_token",
            Error::Serialization(_) => "serialization",
            Error::AlgorithmNotPermitted => "algorithm_not_permitted",
            Error::AlgorithmMismatch { .. } => "algorithm_mismatch",
            Error::InvalidKey(_) => "invalid_key",
            Error::SigningKeyMissing(_) => "signing_key_missing",
            Error::SigningFailed(_) => "signing_failed",
            Error::InvalidSignature => "invalid_signature",
            Error::MissingRequiredClaim(_) => "missing_required_claim",
            Error::ClaimTypeMismatch { .. } => "claim_type_mismatch",
            Error::ExpiredToken { .. } => "expired_token",
            Error::TokenNotYetValid { .. } => "token_not_yet_valid",
            Error::TokenIssuedInFuture { .. } => "token_issued_in_future",
            Error::IssuerRejected { .. } => "issuer_rejected",
            Error::AudienceRejected { .. } => "audience_rejected",
            Error::RequiredClaimValueMismatch(_) => "required_claim_value_mismatch",
        }
    }
}
