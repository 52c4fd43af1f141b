//! # ethkit-crypto
//!
//! Cryptographic helpers built on ecosystem crates (`sha3`, `k256`).
//!
//! - Keccak-256 hashing
//! - EIP-55 address checksums
//! - ECDSA signing and public key recovery (secp256k1)
//! - Ethereum personal message signing / verification

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
mod error;
mod hash;
mod message;
mod signature;

pub use checksum::{parse_address, to_checksum};
pub use error::CryptoError;
pub use hash::keccak256;
pub use message::{personal_message_hash, sign_message, verify_message};
pub use signature::{
    public_key_to_address, recover_address, sign, SecretKey, Signature, SIGNATURE_LENGTH,
};
