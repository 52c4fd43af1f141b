//! # ethkit-abi
//!
//! Ethereum contract ABI head/tail codec.
//!
//! The low-level [`AbiDecoder`] and [`AbiEncoder`] work word by word on
//! `0x` hex. The typed layer ([`encode`], [`decode`]) maps [`Token`]s of a
//! [`ParamType`] list onto them.
//!
//! # Example
//!
//! ```rust
//! use ethkit_abi::{AbiDecoder, AbiEncoder};
//!
//! let mut encoder = AbiEncoder::new(2);
//! encoder.write_u64(42);
//! encoder.write_string("hi");
//! let data = encoder.finalise();
//!
//! let mut decoder = AbiDecoder::new(&data).unwrap();
//! assert_eq!(decoder.read_u64(256).unwrap(), 42);
//! assert_eq!(decoder.read_string().unwrap(), "hi");
//! assert_eq!(decoder.get_all_data_read(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod config;
mod decoder;
mod encoder;
mod error;
mod int;
mod types;

pub use codec::{decode, decode_from, encode, encode_with_config};
pub use config::{EmptyBytesPadding, EncoderConfig};
pub use decoder::AbiDecoder;
pub use encoder::{concat_hex, AbiEncoder};
pub use error::AbiError;
pub use int::{format_int, parse_int};
pub use types::{parse_type, parse_types, ParamType, Token};

/// Size of an ABI word in bytes
pub const WORD: usize = 32;
