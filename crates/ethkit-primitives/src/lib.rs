//! # ethkit-primitives
//!
//! Primitive value types shared by the ethkit crates.
//!
//! - [`Address`]: 20-byte account address
//! - [`H256`]: 32-byte digest
//! - [`U256`]: 256-bit unsigned integer (re-exported from `primitive-types`)
//! - [`hexutil`]: hex⇄binary conversion helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;
pub mod hexutil;

pub use address::{Address, AddressError};
pub use hash::H256;

// Re-export primitive-types for U256
pub use primitive_types::U256;
