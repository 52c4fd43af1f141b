//! Hex⇄binary conversion helpers
//!
//! These operate on bare hex digits; the `0x` prefix used on the wire is
//! handled separately by [`strip_0x`].

/// Encode bytes as lower-case hex without prefix
pub fn hexlify(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex digits (either case, no prefix) into bytes.
///
/// Returns `None` for odd-length input or non-hex characters.
pub fn unhexlify(hex: &str) -> Option<Vec<u8>> {
    hex::decode(hex).ok()
}

/// Strip the mandatory `0x` prefix, returning `None` if it is missing
pub fn strip_0x(s: &str) -> Option<&str> {
    s.strip_prefix("0x")
}

/// Encode bytes as `0x`-prefixed lower-case hex
pub fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hexlify(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexlify() {
        assert_eq!(hexlify(&[]), "");
        assert_eq!(hexlify(&[0x00, 0xab, 0xff]), "00abff");
        assert_eq!(hexlify(b"hi"), "6869");
    }

    #[test]
    fn test_unhexlify_accepts_both_cases() {
        assert_eq!(unhexlify("00ABff"), Some(vec![0x00, 0xab, 0xff]));
        assert_eq!(unhexlify(""), Some(vec![]));
    }

    #[test]
    fn test_unhexlify_rejects_invalid() {
        assert_eq!(unhexlify("abc"), None);
        assert_eq!(unhexlify("zz"), None);
        assert_eq!(unhexlify("0x00"), None);
    }

    #[test]
    fn test_strip_0x() {
        assert_eq!(strip_0x("0xabcd"), Some("abcd"));
        assert_eq!(strip_0x("0x"), Some(""));
        assert_eq!(strip_0x("abcd"), None);
        assert_eq!(strip_0x("0Xab"), None);
    }

    #[test]
    fn test_to_prefixed_hex() {
        assert_eq!(to_prefixed_hex(&[0x12, 0x34]), "0x1234");
        assert_eq!(to_prefixed_hex(&[]), "0x");
    }
}
