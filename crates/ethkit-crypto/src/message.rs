//! Ethereum personal message signatures (`personal_sign`)

use ethkit_primitives::{Address, H256};

use crate::{keccak256, recover_address, sign, CryptoError, SecretKey, Signature};

const MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Hash of `"\x19Ethereum Signed Message:\n" || len(msg) || msg`,
/// with the length written in decimal.
pub fn personal_message_hash(msg: &[u8]) -> H256 {
    let len = msg.len().to_string();
    let mut data = Vec::with_capacity(MESSAGE_PREFIX.len() + len.len() + msg.len());
    data.extend_from_slice(MESSAGE_PREFIX);
    data.extend_from_slice(len.as_bytes());
    data.extend_from_slice(msg);
    keccak256(&data)
}

/// Sign a message the way wallets do for `personal_sign`
pub fn sign_message(msg: &[u8], key: &SecretKey) -> Result<Signature, CryptoError> {
    sign(&personal_message_hash(msg), key)
}

/// Recover the address that signed `msg`.
///
/// `signature` is the 65-byte `0x` hex form with v = 27 or 28. Any
/// malformed signature is an error; a well-formed signature always yields
/// some address, and callers compare it against the expected signer.
pub fn verify_message(msg: &[u8], signature: &str) -> Result<Address, CryptoError> {
    let parsed = Signature::from_hex(signature).map_err(|e| {
        tracing::warn!(error = %e, "signature is malformed");
        e
    })?;

    recover_address(&personal_message_hash(msg), &parsed).map_err(|e| {
        tracing::warn!(error = %e, "failed to recover signer");
        e
    })
}
