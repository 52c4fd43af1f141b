//! Encoder configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AbiError;

/// How an empty `bytes`/`string` payload is padded.
///
/// A zero-length payload is already word aligned. `FullWord` still emits a
/// 32-byte zero block after the length word, which is what existing
/// consumers of this encoder have always received. `Canonical` emits only
/// the length word, as the Solidity compiler does. Decoding accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyBytesPadding {
    /// Length word followed by one zero word.
    ///
    /// The decoder does not consume that zero word, so its extent ends
    /// after the length word.
    #[default]
    FullWord,
    /// Length word only
    Canonical,
}

impl FromStr for EmptyBytesPadding {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-word" => Ok(EmptyBytesPadding::FullWord),
            "canonical" => Ok(EmptyBytesPadding::Canonical),
            other => Err(AbiError::InvalidValue(format!(
                "empty bytes padding must be full-word or canonical, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EmptyBytesPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyBytesPadding::FullWord => f.write_str("full-word"),
            EmptyBytesPadding::Canonical => f.write_str("canonical"),
        }
    }
}

/// Encoder options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Padding of zero-length dynamic bytes
    #[serde(default)]
    pub empty_bytes_padding: EmptyBytesPadding,
}

impl EncoderConfig {
    /// Configuration producing the canonical Solidity layout
    pub fn canonical() -> Self {
        Self {
            empty_bytes_padding: EmptyBytesPadding::Canonical,
        }
    }
}
