//! ABI decoding cursor
//!
//! An [`AbiDecoder`] reads words from the head of its view of the data.
//! Dynamic values are reached through child decoders rooted at the offset
//! stored in a head word. Every decoder tracks how far it (and, through its
//! children, everything it delegated) has read, so that after a sequence of
//! reads [`AbiDecoder::get_all_data_read`] returns exactly the bytes that
//! make up the decoded value.
//!
//! A child mutably borrows its parent for as long as it is alive and merges
//! its extent into the parent when dropped. The parent cannot be read from
//! while a child exists, which keeps the bookkeeping in stack order.

use bytes::Bytes;
use ethkit_primitives::{hexutil, Address, U256};

use crate::int::{parse_int, parse_usize};
use crate::{AbiError, WORD};

/// Link from a child decoder back to the decoder it was spawned from
struct ParentLink<'p> {
    tail_end: &'p mut usize,
    offset: usize,
}

/// Read cursor over ABI-encoded data
pub struct AbiDecoder<'p> {
    /// This decoder's view; byte 0 is the origin for offsets read here
    data: Bytes,
    /// First byte not yet consumed by head reads
    head_end: usize,
    /// Farthest byte reached by any child
    tail_end: usize,
    parent: Option<ParentLink<'p>>,
}

impl AbiDecoder<'static> {
    /// Create a decoder over `0x`-prefixed hex data
    pub fn new(hex: &str) -> Result<Self, AbiError> {
        let digits = hexutil::strip_0x(hex).ok_or(AbiError::MissingPrefix)?;
        let data = hexutil::unhexlify(digits).ok_or_else(|| {
            AbiError::InvalidHex(format!("{} hex digits", digits.len()))
        })?;
        Ok(Self::from_bytes(data))
    }

    /// Create a decoder over raw bytes
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        AbiDecoder {
            data: data.into(),
            head_end: 0,
            tail_end: 0,
            parent: None,
        }
    }
}

impl<'p> AbiDecoder<'p> {
    /// Spawn a child whose view starts `start` bytes into ours
    fn child(&mut self, start: usize) -> Result<AbiDecoder<'_>, AbiError> {
        if start > self.data.len() {
            return Err(AbiError::OffsetOutOfBounds {
                offset: start,
                len: self.data.len(),
            });
        }

        Ok(AbiDecoder {
            data: self.data.slice(start..),
            head_end: 0,
            tail_end: 0,
            parent: Some(ParentLink {
                tail_end: &mut self.tail_end,
                offset: start,
            }),
        })
    }

    /// Offset of this decoder's view within its parent's
    fn parent_offset(&self) -> usize {
        self.parent.as_ref().map_or(0, |p| p.offset)
    }

    fn take(&mut self, len: usize) -> Result<Bytes, AbiError> {
        let available = self.data.len() - self.head_end;
        if len > available {
            return Err(AbiError::UnexpectedEof {
                offset: self.head_end,
                needed: len,
                available,
            });
        }

        let chunk = self.data.slice(self.head_end..self.head_end + len);
        self.head_end += len;
        Ok(chunk)
    }

    /// Read one word and return its low `bits / 8` bytes.
    ///
    /// # Panics
    ///
    /// If `bits` is zero, not a multiple of 8, or above 256.
    fn take_uint(&mut self, bits: usize) -> Result<Bytes, AbiError> {
        assert!(
            bits > 0 && bits % 8 == 0 && bits <= 256,
            "invalid uint bit size: {}",
            bits
        );
        let zeros = WORD - bits / 8;

        let word = self.take(WORD)?;
        if word[..zeros].iter().any(|&b| b != 0) {
            tracing::debug!(bits, offset = self.head_end - WORD, "uint word has high bytes set");
            return Err(AbiError::NonZeroHighBytes { bits });
        }

        Ok(word.slice(zeros..))
    }

    /// Consume `len` bytes from the head and return them as bare hex
    pub fn read_bytes(&mut self, len: usize) -> Result<String, AbiError> {
        Ok(hexutil::hexlify(&self.take(len)?))
    }

    /// Read a `uint<bits>` word as `0x` hex of exactly `bits / 8` bytes.
    ///
    /// The bytes above the declared width must be zero.
    ///
    /// # Panics
    ///
    /// If `bits` is zero, not a multiple of 8, or above 256.
    pub fn read_uint(&mut self, bits: usize) -> Result<String, AbiError> {
        Ok(hexutil::to_prefixed_hex(&self.take_uint(bits)?))
    }

    /// Read a `uint<bits>` word as [`U256`]
    pub fn read_u256(&mut self, bits: usize) -> Result<U256, AbiError> {
        Ok(U256::from_big_endian(&self.take_uint(bits)?))
    }

    /// Read a `uint<bits>` word that must fit into `i64` range
    pub fn read_u64(&mut self, bits: usize) -> Result<u64, AbiError> {
        let text = self.read_uint(bits)?;
        let value = parse_int(&text)?;
        u64::try_from(value).map_err(|_| AbiError::IntegerOverflow(text))
    }

    /// Read an `address` (uint160) word
    pub fn read_address(&mut self) -> Result<Address, AbiError> {
        let raw = self.take_uint(160)?;
        Address::from_slice(&raw).map_err(|e| AbiError::InvalidValue(e.to_string()))
    }

    fn read_len(&mut self) -> Result<usize, AbiError> {
        parse_usize(&self.read_uint(256)?)
    }

    /// Follow the offset in the next head word.
    ///
    /// The returned decoder is rooted at that offset within this decoder's
    /// view; its reads count towards this decoder's extent once dropped.
    pub fn read_dynamic(&mut self) -> Result<AbiDecoder<'_>, AbiError> {
        let ptr = self.read_len()?;
        tracing::trace!(offset = ptr, "following dynamic pointer");
        self.child(ptr)
    }

    /// Read a dynamic `bytes` value
    pub fn read_dynamic_bytes(&mut self) -> Result<Vec<u8>, AbiError> {
        let mut dec = self.read_dynamic()?;
        let len = dec.read_len()?;
        let payload = dec.take(len)?;

        let rem = len % WORD;
        if rem != 0 {
            let padding = dec.take(WORD - rem)?;
            if padding.iter().any(|&b| b != 0) {
                tracing::debug!(len, "padding is not just zeros");
                return Err(AbiError::NonZeroPadding { len });
            }
        }

        Ok(payload.to_vec())
    }

    /// Read a dynamic `string` value; the payload must be UTF-8
    pub fn read_string(&mut self) -> Result<String, AbiError> {
        let payload = self.read_dynamic_bytes()?;
        String::from_utf8(payload).map_err(|_| AbiError::InvalidUtf8)
    }

    /// Read a dynamic array header.
    ///
    /// Returns the element count and a decoder positioned on the first
    /// element. Offsets inside the elements are relative to the start of the
    /// element data (just after the count word), so the element decoder is
    /// spawned from `self` at `pointer + 32` rather than from the decoder
    /// that read the count.
    pub fn read_array(&mut self) -> Result<(usize, AbiDecoder<'_>), AbiError> {
        let (len, start) = {
            let mut dec = self.read_dynamic()?;
            let len = dec.read_len()?;
            (len, dec.parent_offset() + WORD)
        };

        tracing::trace!(len, offset = start, "reading array elements");
        Ok((len, self.child(start)?))
    }

    /// `0x` hex of every byte read so far, including through children.
    ///
    /// Padding is only read after a payload whose length is not a multiple
    /// of 32. The zero word that [`EmptyBytesPadding::FullWord`] writes after
    /// an empty `bytes`/`string` is therefore not counted, and the result is
    /// one word shorter than the encoding in that case.
    ///
    /// [`EmptyBytesPadding::FullWord`]: crate::EmptyBytesPadding::FullWord
    pub fn get_all_data_read(&self) -> String {
        hexutil::to_prefixed_hex(&self.data[..self.bytes_read()])
    }

    /// Number of bytes of this view read so far, including through children
    pub fn bytes_read(&self) -> usize {
        self.head_end.max(self.tail_end)
    }

    /// Bytes left in the head after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len() - self.head_end
    }

    /// See [`parse_int`](crate::parse_int)
    pub fn parse_int(s: &str) -> Result<i64, AbiError> {
        parse_int(s)
    }
}

impl Drop for AbiDecoder<'_> {
    fn drop(&mut self) {
        let end = self.bytes_read();
        if let Some(parent) = self.parent.as_mut() {
            let parent_end = parent.offset + end;
            *parent.tail_end = (*parent.tail_end).max(parent_end);
        }
    }
}
