//! Address checksum commands

use clap::Subcommand;
use ethkit_crypto::{parse_address, to_checksum};
use ethkit_primitives::Address;

use crate::{output::Output, CliError};

/// Address subcommands
#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// Print the EIP-55 checksummed form of an address (any case accepted)
    Checksum {
        /// Address (hex)
        address: String,
    },
    /// Check that an address is all lower case or correctly checksummed
    Validate {
        /// Address (0x hex)
        address: String,
    },
}

impl AddressCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            AddressCommand::Checksum { address } => checksum(&address, json),
            AddressCommand::Validate { address } => validate(&address, json),
        }
    }
}

fn checksum(input: &str, json: bool) -> Result<(), CliError> {
    let address =
        Address::from_hex(input).map_err(|e| CliError::InvalidInput(format!("{}: {}", input, e)))?;
    let checksummed = to_checksum(&address);

    Output::new(json)
        .field("address", &checksummed)
        .message(&checksummed)
        .print();

    Ok(())
}

fn validate(input: &str, json: bool) -> Result<(), CliError> {
    let address = parse_address(input)?;
    let checksummed = to_checksum(&address);

    Output::new(json)
        .field_bool("valid", true)
        .field("address", &checksummed)
        .message(&format!("Valid address: {}", checksummed))
        .print();

    Ok(())
}
