//! ABI encode/decode commands

use clap::Subcommand;
use ethkit_abi::{decode_from, encode_with_config, parse_types, AbiDecoder, AbiError, Token};
use serde_json::Value;

use crate::{config::Config, output::Output, CliError};

/// ABI subcommands
#[derive(Debug, Subcommand)]
pub enum AbiCommand {
    /// Encode a JSON array of values
    Encode {
        /// Comma-separated parameter types, e.g. "uint256,string[]"
        #[arg(short, long)]
        types: String,
        /// Values as a JSON array, e.g. '[1, ["a", "b"]]'
        values: String,
    },
    /// Decode 0x hex data
    Decode {
        /// Comma-separated parameter types, e.g. "uint256,string[]"
        #[arg(short, long)]
        types: String,
        /// ABI-encoded data (0x hex)
        data: String,
    },
}

impl AbiCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            AbiCommand::Encode { types, values } => encode(config, &types, &values, json),
            AbiCommand::Decode { types, data } => decode(&types, &data, json),
        }
    }
}

fn encode(config: &Config, types: &str, values: &str, json: bool) -> Result<(), CliError> {
    let types = parse_types(types)?;
    let values: Value = serde_json::from_str(values)?;
    let values = values
        .as_array()
        .ok_or_else(|| CliError::InvalidInput("values must be a JSON array".to_string()))?;

    if values.len() != types.len() {
        return Err(AbiError::ArityMismatch {
            expected: types.len(),
            actual: values.len(),
        }
        .into());
    }

    let tokens = types
        .iter()
        .zip(values)
        .map(|(t, v)| Token::from_json(t, v))
        .collect::<Result<Vec<_>, _>>()?;

    let data = encode_with_config(&types, &tokens, config.encoder_config())?;
    tracing::debug!(params = types.len(), len = data.len(), "encoded parameters");

    Output::new(json)
        .field("data", &data)
        .message(&data)
        .print();

    Ok(())
}

fn decode(types: &str, data: &str, json: bool) -> Result<(), CliError> {
    let types = parse_types(types)?;
    let mut decoder = AbiDecoder::new(data)?;
    let tokens = decode_from(&mut decoder, &types)?;
    let bytes_read = decoder.bytes_read();

    let values: Vec<Value> = tokens.iter().map(Token::to_json).collect();
    let mut lines: Vec<String> = types
        .iter()
        .zip(&values)
        .map(|(t, v)| format!("{}: {}", t, v))
        .collect();
    lines.push(format!("Bytes read: {}", bytes_read));

    Output::new(json)
        .field_value("values", Value::Array(values))
        .field_u64("bytes_read", bytes_read as u64)
        .message(&lines.join("\n"))
        .print();

    Ok(())
}
