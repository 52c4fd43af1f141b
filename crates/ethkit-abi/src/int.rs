//! Integer parsing and formatting for offsets, lengths and counts

use crate::AbiError;

/// Parse `0x`-prefixed hex or plain decimal into an `i64`.
///
/// The value is formatted back in the same radix, zero-padded to the input
/// width, and must reproduce the input exactly. This rejects values that do
/// not fit into 64 bits, upper-case hex digits and stray signs.
pub fn parse_int(s: &str) -> Result<i64, AbiError> {
    let (digits, radix) = match s.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    let overflow = || AbiError::IntegerOverflow(s.to_string());
    let value = i64::from_str_radix(digits, radix).map_err(|_| overflow())?;

    let formatted = if radix == 16 {
        format!("{:x}", value)
    } else {
        value.to_string()
    };
    let padded = format!("{:0>width$}", formatted, width = digits.len());
    if padded != digits {
        tracing::debug!(input = s, "integer does not round-trip");
        return Err(overflow());
    }

    Ok(value)
}

/// Format as minimal `0x` hex with an even number of digits
pub fn format_int(value: u64) -> String {
    let digits = format!("{:x}", value);
    if digits.len() % 2 == 1 {
        format!("0x0{}", digits)
    } else {
        format!("0x{}", digits)
    }
}

/// Parse an offset or length word into a `usize`
pub(crate) fn parse_usize(s: &str) -> Result<usize, AbiError> {
    let value = parse_int(s)?;
    usize::try_from(value).map_err(|_| AbiError::IntegerOverflow(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_int("0").unwrap(), 0);
        assert_eq!(parse_int("42").unwrap(), 42);
        assert_eq!(parse_int("-17").unwrap(), -17);
        assert_eq!(parse_int("0042").unwrap(), 42);
        assert_eq!(parse_int("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(parse_int("-9223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_int("0x00").unwrap(), 0);
        assert_eq!(parse_int("0x2a").unwrap(), 42);
        assert_eq!(parse_int("0x0000002a").unwrap(), 42);
        assert_eq!(parse_int("0x7fffffffffffffff").unwrap(), i64::MAX);

        let word = format!("0x{:0>64}", "20");
        assert_eq!(parse_int(&word).unwrap(), 32);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_int("9223372036854775808").is_err());
        assert!(parse_int("0x8000000000000000").is_err());
        assert!(parse_int("0xffffffffffffffffffff").is_err());

        let word = format!("0x01{:0>62}", "");
        assert!(matches!(parse_int(&word), Err(AbiError::IntegerOverflow(_))));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "0x", "abc", "12a", "+5", "-05", "0x-5", "0xAB", "0x 1", " 1"] {
            assert!(parse_int(input).is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_format_int() {
        assert_eq!(format_int(0), "0x00");
        assert_eq!(format_int(0x20), "0x20");
        assert_eq!(format_int(0x123), "0x0123");
        assert_eq!(format_int(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn test_format_then_parse() {
        for value in [0u64, 1, 31, 32, 255, 256, 65_535, 1 << 40] {
            assert_eq!(parse_int(&format_int(value)).unwrap() as u64, value);
        }
    }

    #[test]
    fn test_parse_usize() {
        assert_eq!(parse_usize("0x40").unwrap(), 64);
        assert!(parse_usize("-1").is_err());
    }
}
