//! ECDSA signature operations using secp256k1

use std::fmt;

use ethkit_primitives::{Address, H256};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};

use crate::{keccak256, CryptoError};

/// Length of a serialized signature (r || s || v)
pub const SIGNATURE_LENGTH: usize = 65;

/// ECDSA signature with Ethereum-style recovery byte
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// r component (32 bytes)
    pub r: [u8; 32],
    /// s component (32 bytes)
    pub s: [u8; 32],
    /// recovery id, stored as 27 or 28
    pub v: u8,
}

impl Signature {
    /// Create signature from r, s, v components
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Signature { r, s, v }
    }

    /// Convert to 65-byte representation (r || s || v)
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// Parse from a 65-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Signature { r, s, v: bytes[64] })
    }

    /// Parse from `0x`-prefixed hex
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let body = s.strip_prefix("0x").ok_or(CryptoError::MissingPrefix)?;
        let bytes = hex::decode(body).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Format as `0x`-prefixed hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Recovery id as 0 or 1; anything but v = 27/28 is rejected
    pub fn recovery_id(&self) -> Result<u8, CryptoError> {
        match self.v {
            27 | 28 => Ok(self.v - 27),
            other => Err(CryptoError::InvalidRecoveryId(other)),
        }
    }
}

/// secp256k1 secret key
///
/// Debug output never includes the key material.
#[derive(Clone)]
pub struct SecretKey(SigningKey);

impl SecretKey {
    /// Create from 32 raw bytes; zero and values >= curve order are rejected
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidPrivateKey);
        }
        SigningKey::from_slice(bytes)
            .map(SecretKey)
            .map_err(|_| CryptoError::InvalidPrivateKey)
    }

    /// Parse from `0x`-prefixed hex (64 hex digits)
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let body = s.strip_prefix("0x").ok_or(CryptoError::MissingPrefix)?;
        let bytes = hex::decode(body).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }

    /// The address controlled by this key
    pub fn address(&self) -> Address {
        public_key_to_address(self.0.verifying_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.0
    }
}

impl From<SigningKey> for SecretKey {
    fn from(key: SigningKey) -> Self {
        SecretKey(key)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Sign a 32-byte digest; the signature is normalized to low-s
pub fn sign(hash: &H256, key: &SecretKey) -> Result<Signature, CryptoError> {
    let (signature, recovery_id) = key
        .signing_key()
        .sign_prehash_recoverable(hash.as_bytes())
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let (signature, recovery_id) = normalize(signature, recovery_id);

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Ok(Signature {
        r,
        s,
        v: recovery_id.to_byte() + 27,
    })
}

/// Recover the signing address from a digest and signature.
///
/// High-s signatures are accepted; they are normalized before recovery.
pub fn recover_address(hash: &H256, signature: &Signature) -> Result<Address, CryptoError> {
    let recovery_byte = signature.recovery_id()?;
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or(CryptoError::InvalidRecoveryId(signature.v))?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let k256_sig = K256Signature::from_slice(&compact)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let (k256_sig, recovery_id) = normalize(k256_sig, recovery_id);

    let key = VerifyingKey::recover_from_prehash(hash.as_bytes(), &k256_sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(public_key_to_address(&key))
}

/// Derive the address from a public key: last 20 bytes of
/// keccak256 over the uncompressed point without its 0x04 tag.
pub fn public_key_to_address(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut addr_bytes = [0u8; 20];
    addr_bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(addr_bytes)
}

/// Flip high-s to n - s, which also flips the parity of R.y
fn normalize(signature: K256Signature, recovery_id: RecoveryId) -> (K256Signature, RecoveryId) {
    match signature.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    }
}
