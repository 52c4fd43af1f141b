//! Subcommand implementations

pub mod abi;
pub mod address;
pub mod keccak;
pub mod sign;

use ethkit_primitives::hexutil;

use crate::CliError;

/// Decode `0x`-prefixed hex input
pub(crate) fn parse_hex_arg(input: &str) -> Result<Vec<u8>, CliError> {
    let digits = hexutil::strip_0x(input)
        .ok_or_else(|| CliError::InvalidHex(format!("missing 0x prefix: {}", input)))?;
    hexutil::unhexlify(digits).ok_or_else(|| CliError::InvalidHex(input.to_string()))
}
