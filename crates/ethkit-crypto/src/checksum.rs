//! EIP-55 mixed-case address checksums
//!
//! The checksum upper-cases the i-th hex letter of the address iff the i-th
//! nibble of `keccak256(lower_case_hex)` is at least 8.

use ethkit_primitives::{hexutil, Address};

use crate::{keccak256, CryptoError};

/// Format an address in EIP-55 checksummed form (with 0x prefix)
pub fn to_checksum(address: &Address) -> String {
    let addr_hex = hex::encode(address.as_bytes());
    let hash = keccak256(addr_hex.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in addr_hex.chars().enumerate() {
        let byte = hash.as_bytes()[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Parse a `0x`-prefixed address, validating its checksum.
///
/// The address is accepted if it is entirely lower case or matches its
/// EIP-55 checksummed form exactly.
pub fn parse_address(s: &str) -> Result<Address, CryptoError> {
    let body = s.strip_prefix("0x").ok_or_else(|| {
        tracing::warn!(address = s, "address is missing 0x prefix");
        CryptoError::InvalidAddress(format!("missing 0x prefix: {}", s))
    })?;

    let address = hexutil::unhexlify(body)
        .ok_or_else(|| format!("invalid hex: {}", s))
        .and_then(|bytes| Address::from_slice(&bytes).map_err(|e| e.to_string()))
        .map_err(|reason| {
            tracing::warn!(address = s, error = %reason, "address is malformed");
            CryptoError::InvalidAddress(reason)
        })?;

    let is_lower = body.chars().all(|c| !c.is_ascii_uppercase());
    if !is_lower && to_checksum(&address) != s {
        tracing::warn!(address = s, "address checksum mismatch");
        return Err(CryptoError::InvalidAddress(format!("bad checksum: {}", s)));
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_to_checksum_vectors() {
        for expected in CHECKSUMMED {
            let addr = Address::from_hex(expected).unwrap();
            assert_eq!(to_checksum(&addr), expected);
        }
    }

    #[test]
    fn test_parse_valid_checksums() {
        for text in CHECKSUMMED {
            assert!(parse_address(text).is_ok(), "{} should be valid", text);
        }
    }

    #[test]
    fn test_parse_lower_case() {
        let addr = parse_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(to_checksum(&addr), CHECKSUMMED[0]);
    }

    #[test]
    fn test_parse_bad_checksum() {
        for text in [
            "0x5aAeb6053f3E94C9b9A09f33669435E7Ef1BeAed",
            "0xFB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407d01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be5A2E6BA89F429762e7b9aDb",
        ] {
            assert!(
                matches!(parse_address(text), Err(CryptoError::InvalidAddress(_))),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_parse_malformed() {
        for text in [
            "foo",
            "0xaab",
            "0xinvalidd",
            "0x1234",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert!(parse_address(text).is_err(), "{} should be rejected", text);
        }
    }

    #[test]
    fn test_parse_doubled_prefix() {
        let err = parse_address("0x0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidAddress(_)));
        assert!(parse_address("0x0X5aaeb6053f3e94c9b9a09f33669435e7ef1bea").is_err());
    }

    #[test]
    fn test_all_upper_case_rejected() {
        assert!(parse_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let addr = parse_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(parse_address(&to_checksum(&addr)).unwrap(), addr);
        assert_eq!(parse_address(&addr.to_hex()).unwrap(), addr);
    }
}
