//! CLI error types

use ethkit_abi::AbiError;
use ethkit_crypto::CryptoError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// ABI encoding or decoding failed
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Address, hash or signature failure
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
