//! ABI codec errors

use thiserror::Error;

/// Errors produced while decoding or encoding ABI data.
///
/// Only data-dependent failures are reported here. Schema/caller mistakes
/// (an invalid uint width, an oversized word, a head-word count that does
/// not match the writes) are bugs in the calling code and panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Hex input does not start with `0x`
    #[error("missing 0x prefix")]
    MissingPrefix,

    /// Hex input contains non-hex characters or has odd length
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A read ran past the end of the data
    #[error("unexpected end of data: need {needed} bytes at offset {offset}, have {available}")]
    UnexpectedEof {
        /// Offset of the read within the current decoder
        offset: usize,
        /// Bytes requested
        needed: usize,
        /// Bytes remaining
        available: usize,
    },

    /// A uint word has non-zero bytes above its declared width
    #[error("uint{bits} word has non-zero high bytes")]
    NonZeroHighBytes {
        /// Declared bit width
        bits: usize,
    },

    /// Padding after a bytes/string payload is not all zero
    #[error("non-zero padding after {len}-byte payload")]
    NonZeroPadding {
        /// Payload length
        len: usize,
    },

    /// Integer does not fit into 64 bits or is not canonically formatted
    #[error("integer overflow or malformed integer: {0}")]
    IntegerOverflow(String),

    /// A dynamic pointer points past the end of the data
    #[error("offset {offset} out of bounds for {len}-byte data")]
    OffsetOutOfBounds {
        /// Decoded offset
        offset: usize,
        /// Length of the data the offset is relative to
        len: usize,
    },

    /// String payload is not valid UTF-8
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// Type name could not be parsed
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Type is valid ABI but outside the supported subset
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Token does not match the declared type
    #[error("token does not match type {0}")]
    TokenMismatch(String),

    /// Number of values differs from the number of types
    #[error("expected {expected} values, got {actual}")]
    ArityMismatch {
        /// Number of types
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Value cannot be represented in the declared type
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl AbiError {
    /// Whether the input text itself is malformed (prefix / hex digits)
    pub fn is_format_error(&self) -> bool {
        matches!(self, AbiError::MissingPrefix | AbiError::InvalidHex(_))
    }

    /// Whether well-formed hex violates the ABI layout rules
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            AbiError::UnexpectedEof { .. }
                | AbiError::NonZeroHighBytes { .. }
                | AbiError::NonZeroPadding { .. }
                | AbiError::IntegerOverflow(_)
                | AbiError::OffsetOutOfBounds { .. }
                | AbiError::InvalidUtf8
        )
    }
}
