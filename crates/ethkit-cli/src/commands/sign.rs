//! Personal message signing and verification commands

use ethkit_crypto::{sign_message, to_checksum, verify_message, SecretKey};

use crate::{output::Output, CliError};

/// Sign `message` with the key given as 0x hex
pub fn sign(key: &str, message: &str, json: bool) -> Result<(), CliError> {
    let key = SecretKey::from_hex(key)?;
    let signature = sign_message(message.as_bytes(), &key)?.to_hex();
    let signer = to_checksum(&key.address());

    Output::new(json)
        .field("signature", &signature)
        .field("address", &signer)
        .message(&format!("Signature: {}\nSigner: {}", signature, signer))
        .print();

    Ok(())
}

/// Recover the signer of `message` from a 65-byte 0x hex signature
pub fn verify(message: &str, signature: &str, json: bool) -> Result<(), CliError> {
    let signer = to_checksum(&verify_message(message.as_bytes(), signature)?);

    Output::new(json)
        .field("address", &signer)
        .message(&format!("Signer: {}", signer))
        .print();

    Ok(())
}
