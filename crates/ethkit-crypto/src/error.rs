//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Input is missing the 0x prefix
    #[error("missing 0x prefix")]
    MissingPrefix,

    /// Input is not valid hex
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Address is malformed or fails its checksum
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid private key
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Signing failed
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Invalid signature
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Invalid recovery ID (v)
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Recovery failed
    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}
