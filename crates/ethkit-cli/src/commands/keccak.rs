//! Keccak-256 hashing command

use ethkit_crypto::keccak256;

use super::parse_hex_arg;
use crate::{output::Output, CliError};

/// Hash `input`, read as 0x hex or, with `text`, as UTF-8 text
pub fn execute(input: &str, text: bool, json: bool) -> Result<(), CliError> {
    let data = if text {
        input.as_bytes().to_vec()
    } else {
        parse_hex_arg(input)?
    };

    let hash = keccak256(&data).to_hex();

    Output::new(json)
        .field("hash", &hash)
        .field_u64("input_len", data.len() as u64)
        .message(&hash)
        .print();

    Ok(())
}
