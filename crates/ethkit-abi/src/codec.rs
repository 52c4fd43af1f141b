//! Typed encoding and decoding on top of [`AbiEncoder`] / [`AbiDecoder`]

use crate::config::EncoderConfig;
use crate::decoder::AbiDecoder;
use crate::encoder::AbiEncoder;
use crate::types::{ParamType, Token};
use crate::{AbiError, WORD};

/// Encode `tokens` as a parameter list of `types`
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<String, AbiError> {
    encode_with_config(types, tokens, EncoderConfig::default())
}

/// [`encode`] with explicit encoder options
pub fn encode_with_config(
    types: &[ParamType],
    tokens: &[Token],
    config: EncoderConfig,
) -> Result<String, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::ArityMismatch {
            expected: types.len(),
            actual: tokens.len(),
        });
    }
    for param_type in types {
        param_type.validate()?;
    }

    let mut encoder = AbiEncoder::with_config(types.len(), config);
    write_params(&mut encoder, types.iter(), tokens)?;
    Ok(encoder.finalise())
}

fn write_params<'a>(
    encoder: &mut AbiEncoder,
    types: impl Iterator<Item = &'a ParamType>,
    tokens: &[Token],
) -> Result<(), AbiError> {
    for (param_type, token) in types.zip(tokens) {
        write_token(encoder, param_type, token)?;
    }
    Ok(())
}

fn write_token(encoder: &mut AbiEncoder, param_type: &ParamType, token: &Token) -> Result<(), AbiError> {
    match (param_type, token) {
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if value.bits() > *bits {
                return Err(AbiError::InvalidValue(format!(
                    "{} does not fit into uint{}",
                    value, bits
                )));
            }
            encoder.write_u256(*value);
        }
        (ParamType::Address, Token::Address(address)) => encoder.write_address(address),
        (ParamType::Bytes, Token::Bytes(data)) => encoder.write_raw_bytes(data),
        (ParamType::String, Token::String(s)) => encoder.write_string(s),
        (ParamType::Array(inner), Token::Array(items)) => {
            encoder.write_array(items.len(), |elements| {
                write_params(elements, std::iter::repeat(&**inner), items)
            })?;
        }
        _ => return Err(AbiError::TokenMismatch(param_type.to_string())),
    }
    Ok(())
}

/// Decode `0x` hex data as a parameter list of `types`
pub fn decode(types: &[ParamType], hex: &str) -> Result<Vec<Token>, AbiError> {
    let mut decoder = AbiDecoder::new(hex)?;
    decode_from(&mut decoder, types)
}

/// Decode `types` from the current position of `decoder`.
///
/// Afterwards `decoder.get_all_data_read()` covers exactly the bytes
/// that made up the values.
pub fn decode_from(decoder: &mut AbiDecoder<'_>, types: &[ParamType]) -> Result<Vec<Token>, AbiError> {
    for param_type in types {
        param_type.validate()?;
    }
    types.iter().map(|t| read_token(decoder, t)).collect()
}

fn read_token(decoder: &mut AbiDecoder<'_>, param_type: &ParamType) -> Result<Token, AbiError> {
    let token = match param_type {
        ParamType::Uint(bits) => Token::Uint(decoder.read_u256(*bits)?),
        ParamType::Address => Token::Address(decoder.read_address()?),
        ParamType::Bytes => Token::Bytes(decoder.read_dynamic_bytes()?),
        ParamType::String => Token::String(decoder.read_string()?),
        ParamType::Array(inner) => {
            let (len, mut elements) = decoder.read_array()?;

            // Every element occupies one head word
            let available = elements.remaining();
            match len.checked_mul(WORD) {
                Some(needed) if needed <= available => {}
                needed => {
                    return Err(AbiError::UnexpectedEof {
                        offset: 0,
                        needed: needed.unwrap_or(usize::MAX),
                        available,
                    })
                }
            }

            let items = (0..len)
                .map(|_| read_token(&mut elements, inner))
                .collect::<Result<Vec<_>, _>>()?;
            Token::Array(items)
        }
    };
    Ok(token)
}
