//! ABI type definitions

use std::fmt;

use ethkit_primitives::{hexutil, Address, U256};
use serde_json::Value;

use crate::AbiError;

/// Parameter types supported by the codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Address
    Address,
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
    /// Dynamic array of a non-array type
    Array(Box<ParamType>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::Bytes | ParamType::String | ParamType::Array(_))
    }

    /// Reject types the codec cannot handle.
    ///
    /// `parse_type` never produces these, but a `ParamType` built by hand can.
    pub fn validate(&self) -> Result<(), AbiError> {
        match self {
            ParamType::Uint(bits) if !valid_uint_bits(*bits) => {
                Err(AbiError::UnsupportedType(self.to_string()))
            }
            ParamType::Array(inner) => match **inner {
                ParamType::Array(_) => Err(AbiError::UnsupportedType(self.to_string())),
                ref other => other.validate(),
            },
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Address => f.write_str("address"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

fn valid_uint_bits(bits: usize) -> bool {
    bits > 0 && bits % 8 == 0 && bits <= 256
}

/// Parse a type name such as `uint256`, `address` or `string[]`
pub fn parse_type(s: &str) -> Result<ParamType, AbiError> {
    let s = s.trim();

    if let Some(inner) = s.strip_suffix("[]") {
        let inner = parse_type(inner)?;
        if let ParamType::Array(_) = inner {
            return Err(AbiError::UnsupportedType(s.to_string()));
        }
        return Ok(ParamType::Array(Box::new(inner)));
    }
    // Fixed-size arrays and tuples
    if s.ends_with(']') || s.starts_with('(') {
        return Err(AbiError::UnsupportedType(s.to_string()));
    }

    match s {
        "address" => return Ok(ParamType::Address),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        "bool" | "function" => return Err(AbiError::UnsupportedType(s.to_string())),
        _ => {}
    }

    // uint<N>
    if let Some(rest) = s.strip_prefix("uint") {
        let bits: usize = if rest.is_empty() {
            256
        } else {
            rest.parse().map_err(|_| AbiError::UnknownType(s.to_string()))?
        };
        if !valid_uint_bits(bits) {
            return Err(AbiError::UnknownType(s.to_string()));
        }
        return Ok(ParamType::Uint(bits));
    }

    // int<N>, bytes<N>, fixed/ufixed
    for prefix in ["int", "bytes", "fixed", "ufixed"] {
        if s.starts_with(prefix) {
            return Err(AbiError::UnsupportedType(s.to_string()));
        }
    }

    Err(AbiError::UnknownType(s.to_string()))
}

/// Parse a comma-separated type list such as `uint256,string[]`
pub fn parse_types(s: &str) -> Result<Vec<ParamType>, AbiError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(parse_type).collect()
}

/// ABI values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unsigned integer
    Uint(U256),
    /// Address (20 bytes)
    Address(Address),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
}

impl Token {
    /// Create a uint256 token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Check that this token can be encoded as `param_type`
    pub fn type_check(&self, param_type: &ParamType) -> bool {
        match (param_type, self) {
            (ParamType::Uint(bits), Token::Uint(value)) => value.bits() <= *bits,
            (ParamType::Address, Token::Address(_))
            | (ParamType::Bytes, Token::Bytes(_))
            | (ParamType::String, Token::String(_)) => true,
            (ParamType::Array(inner), Token::Array(tokens)) => {
                tokens.iter().all(|t| t.type_check(inner))
            }
            _ => false,
        }
    }

    /// Build a token of `param_type` from JSON.
    ///
    /// Integers are JSON numbers or strings (decimal or `0x` hex); addresses
    /// and bytes are `0x` hex strings.
    pub fn from_json(param_type: &ParamType, value: &Value) -> Result<Token, AbiError> {
        let mismatch = || AbiError::TokenMismatch(param_type.to_string());

        match param_type {
            ParamType::Uint(bits) => {
                let number = match value {
                    Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(mismatch)?,
                    Value::String(s) => parse_u256(s)?,
                    _ => return Err(mismatch()),
                };
                if number.bits() > *bits {
                    return Err(AbiError::InvalidValue(format!(
                        "{} does not fit into uint{}",
                        number, bits
                    )));
                }
                Ok(Token::Uint(number))
            }
            ParamType::Address => {
                let raw = prefixed_hex(value.as_str().ok_or_else(mismatch)?)?;
                Address::from_slice(&raw)
                    .map(Token::Address)
                    .map_err(|e| AbiError::InvalidValue(e.to_string()))
            }
            ParamType::Bytes => {
                let raw = prefixed_hex(value.as_str().ok_or_else(mismatch)?)?;
                Ok(Token::Bytes(raw))
            }
            ParamType::String => {
                let s = value.as_str().ok_or_else(mismatch)?;
                Ok(Token::String(s.to_string()))
            }
            ParamType::Array(inner) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                items
                    .iter()
                    .map(|item| Token::from_json(inner, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Token::Array)
            }
        }
    }

    /// JSON form of this token; integers become decimal strings
    pub fn to_json(&self) -> Value {
        match self {
            Token::Uint(value) => Value::String(value.to_string()),
            Token::Address(address) => Value::String(address.to_hex()),
            Token::Bytes(data) => Value::String(hexutil::to_prefixed_hex(data)),
            Token::String(s) => Value::String(s.clone()),
            Token::Array(tokens) => Value::Array(tokens.iter().map(Token::to_json).collect()),
        }
    }
}

/// Decode a string that must be `0x` followed by hex digits
fn prefixed_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let digits = hexutil::strip_0x(s).ok_or(AbiError::MissingPrefix)?;
    hexutil::unhexlify(digits).ok_or_else(|| AbiError::InvalidHex(s.to_string()))
}

fn parse_u256(s: &str) -> Result<U256, AbiError> {
    let invalid = || AbiError::InvalidValue(format!("not an unsigned integer: {}", s));
    match s.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
        None => U256::from_dec_str(s).map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::Array(Box::new(ParamType::Uint(256))).is_dynamic());
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(parse_type("address").unwrap(), ParamType::Address);
        assert_eq!(parse_type("uint256").unwrap(), ParamType::Uint(256));
        assert_eq!(parse_type("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(parse_type("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(parse_type("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(parse_type(" string ").unwrap(), ParamType::String);
        assert_eq!(
            parse_type("string[]").unwrap(),
            ParamType::Array(Box::new(ParamType::String))
        );
    }

    #[test]
    fn test_parse_type_rejects() {
        assert!(matches!(parse_type("uint7"), Err(AbiError::UnknownType(_))));
        assert!(matches!(parse_type("uint264"), Err(AbiError::UnknownType(_))));
        assert!(matches!(parse_type("uintx"), Err(AbiError::UnknownType(_))));
        assert!(matches!(parse_type("foo"), Err(AbiError::UnknownType(_))));

        for unsupported in ["bool", "int256", "bytes32", "uint256[2]", "(uint256,string)", "uint256[][]"] {
            assert!(
                matches!(parse_type(unsupported), Err(AbiError::UnsupportedType(_))),
                "{} should be unsupported",
                unsupported
            );
        }
    }

    #[test]
    fn test_parse_types() {
        assert_eq!(
            parse_types("uint256,string[]").unwrap(),
            vec![
                ParamType::Uint(256),
                ParamType::Array(Box::new(ParamType::String))
            ]
        );
        assert!(parse_types("").unwrap().is_empty());
        assert!(parse_types("uint256,,string").is_err());
    }

    #[test]
    fn test_display_round_trips_parse() {
        for name in ["uint8", "uint256", "address", "bytes", "string", "address[]"] {
            assert_eq!(parse_type(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_validate() {
        assert!(ParamType::Uint(256).validate().is_ok());
        assert!(ParamType::Uint(12).validate().is_err());
        assert!(ParamType::Array(Box::new(ParamType::Uint(0))).validate().is_err());
        let nested = ParamType::Array(Box::new(ParamType::Array(Box::new(ParamType::Bytes))));
        assert!(matches!(nested.validate(), Err(AbiError::UnsupportedType(_))));
    }

    #[test]
    fn test_from_json_uint() {
        let ty = ParamType::Uint(256);
        assert_eq!(Token::from_json(&ty, &json!(42)).unwrap(), Token::uint(42u64));
        assert_eq!(Token::from_json(&ty, &json!("42")).unwrap(), Token::uint(42u64));
        assert_eq!(Token::from_json(&ty, &json!("0x2a")).unwrap(), Token::uint(42u64));
        assert!(Token::from_json(&ty, &json!(-1)).is_err());
        assert!(Token::from_json(&ty, &json!("0x")).is_err());
        assert!(Token::from_json(&ty, &json!(true)).is_err());

        let small = ParamType::Uint(8);
        assert!(Token::from_json(&small, &json!(255)).is_ok());
        assert!(matches!(
            Token::from_json(&small, &json!(256)),
            Err(AbiError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_from_json_array() {
        let ty = parse_type("string[]").unwrap();
        let token = Token::from_json(&ty, &json!(["a", "bc"])).unwrap();
        assert_eq!(
            token,
            Token::Array(vec![Token::string("a"), Token::string("bc")])
        );
        assert!(Token::from_json(&ty, &json!(["a", 1])).is_err());
    }

    #[test]
    fn test_from_json_bytes_and_address() {
        assert_eq!(
            Token::from_json(&ParamType::Bytes, &json!("0x0102")).unwrap(),
            Token::Bytes(vec![1, 2])
        );
        assert_eq!(
            Token::from_json(&ParamType::Bytes, &json!("0102")).unwrap_err(),
            AbiError::MissingPrefix
        );
        assert!(Token::from_json(&ParamType::Address, &json!("0x1234")).is_err());
    }

    #[test]
    fn test_from_json_address_requires_single_prefix() {
        let ty = ParamType::Address;
        let token = Token::from_json(&ty, &json!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")).unwrap();
        assert_eq!(
            token.to_json(),
            json!("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")
        );

        assert_eq!(
            Token::from_json(&ty, &json!("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")).unwrap_err(),
            AbiError::MissingPrefix
        );
        assert!(matches!(
            Token::from_json(&ty, &json!("0x0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")),
            Err(AbiError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_to_json() {
        let token = Token::Array(vec![Token::uint(7u64), Token::uint(U256::MAX)]);
        assert_eq!(
            token.to_json(),
            json!(["7", U256::MAX.to_string()])
        );
        assert_eq!(Token::Bytes(vec![0xab]).to_json(), json!("0xab"));
    }

    #[test]
    fn test_type_check() {
        assert!(Token::uint(255u64).type_check(&ParamType::Uint(8)));
        assert!(!Token::uint(256u64).type_check(&ParamType::Uint(8)));
        assert!(!Token::string("x").type_check(&ParamType::Bytes));
        assert!(Token::Array(vec![]).type_check(&ParamType::Array(Box::new(ParamType::Bytes))));
    }
}
