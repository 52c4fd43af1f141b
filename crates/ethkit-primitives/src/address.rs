//! 20-byte account address
//!
//! Parsing here is case-insensitive. Mixed-case checksum validation needs
//! Keccak-256 and lives in `ethkit-crypto`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Ethereum 20-byte address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; 20] = slice
            .try_into()
            .map_err(|_| AddressError::InvalidLength(slice.len()))?;
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix, any case)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lower-case hex with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
