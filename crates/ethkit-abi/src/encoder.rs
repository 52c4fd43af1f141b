//! ABI encoding builder
//!
//! An [`AbiEncoder`] is created with the number of head words it will hold.
//! Static values go straight into the head; dynamic values put an offset in
//! the head and their payload in the tail. [`AbiEncoder::finalise`] consumes
//! the encoder and returns `head ++ tail`.

use bytes::{BufMut, BytesMut};
use ethkit_primitives::{hexutil, Address, U256};

use crate::config::{EmptyBytesPadding, EncoderConfig};
use crate::{AbiError, WORD};

/// Head/tail ABI encoder
#[derive(Debug)]
pub struct AbiEncoder {
    head_words: usize,
    head: BytesMut,
    tail: BytesMut,
    config: EncoderConfig,
}

impl AbiEncoder {
    /// Create an encoder expecting exactly `head_words` head words
    pub fn new(head_words: usize) -> Self {
        Self::with_config(head_words, EncoderConfig::default())
    }

    /// Create an encoder with explicit options
    pub fn with_config(head_words: usize, config: EncoderConfig) -> Self {
        Self {
            head_words,
            head: BytesMut::with_capacity(head_words * WORD),
            tail: BytesMut::new(),
            config,
        }
    }

    /// Options this encoder was created with
    pub fn config(&self) -> EncoderConfig {
        self.config
    }

    /// Left-pad raw bytes to a word and append it to the head.
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than 32 bytes.
    pub fn write_word_bytes(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= WORD,
            "word too long: {} bytes",
            bytes.len()
        );
        self.head.put_bytes(0, WORD - bytes.len());
        self.head.put_slice(bytes);
    }

    /// Append a `0x` hex value of at most 32 bytes to the head, left-padded.
    ///
    /// # Panics
    ///
    /// If the decoded value is longer than 32 bytes.
    pub fn write_word(&mut self, hex: &str) -> Result<(), AbiError> {
        let bytes = decode_hex(hex)?;
        self.write_word_bytes(&bytes);
        Ok(())
    }

    /// Append a `uint256` word
    pub fn write_u256(&mut self, value: U256) {
        let mut word = [0u8; WORD];
        value.to_big_endian(&mut word);
        self.head.put_slice(&word);
    }

    /// Append a `uint256` word from a native integer
    pub fn write_u64(&mut self, value: u64) {
        self.write_word_bytes(&value.to_be_bytes());
    }

    /// Append an `address` word
    pub fn write_address(&mut self, address: &Address) {
        self.write_word_bytes(address.as_bytes());
    }

    /// Write an offset word pointing at the current end of the tail, then
    /// append `data` to the tail
    pub fn write_dynamic_bytes(&mut self, data: &[u8]) {
        let pointer = self.head_words * WORD + self.tail.len();
        tracing::trace!(pointer, len = data.len(), "writing dynamic value");
        self.write_u64(pointer as u64);
        self.tail.put_slice(data);
    }

    /// [`write_dynamic_bytes`](Self::write_dynamic_bytes) for `0x` hex tail data
    pub fn write_dynamic(&mut self, tail_hex: &str) -> Result<(), AbiError> {
        let data = decode_hex(tail_hex)?;
        self.write_dynamic_bytes(&data);
        Ok(())
    }

    /// Write a dynamic `bytes` value from raw bytes
    pub fn write_raw_bytes(&mut self, payload: &[u8]) {
        let mut nested = AbiEncoder::with_config(1, self.config);
        nested.write_u64(payload.len() as u64);
        nested.tail.put_slice(payload);
        nested.tail.put_bytes(0, self.padding_len(payload.len()));

        let blob = nested.finalise_bytes();
        self.write_dynamic_bytes(&blob);
    }

    /// Write a dynamic `bytes` value from `0x` hex
    pub fn write_bytes(&mut self, hex: &str) -> Result<(), AbiError> {
        let payload = decode_hex(hex)?;
        self.write_raw_bytes(&payload);
        Ok(())
    }

    /// Write a dynamic `string` value
    pub fn write_string(&mut self, value: &str) {
        self.write_raw_bytes(value.as_bytes());
    }

    /// Write a dynamic array of `len` elements.
    ///
    /// `write_elements` receives an encoder with `len` head words and must
    /// write exactly one head word per element.
    pub fn write_array<F>(&mut self, len: usize, write_elements: F) -> Result<(), AbiError>
    where
        F: FnOnce(&mut AbiEncoder) -> Result<(), AbiError>,
    {
        let mut elements = AbiEncoder::with_config(len, self.config);
        write_elements(&mut elements)?;

        let mut blob = BytesMut::with_capacity(WORD + elements.head.len() + elements.tail.len());
        let mut count = [0u8; WORD];
        U256::from(len).to_big_endian(&mut count);
        blob.put_slice(&count);
        blob.put_slice(&elements.finalise_bytes());

        self.write_dynamic_bytes(&blob);
        Ok(())
    }

    fn padding_len(&self, len: usize) -> usize {
        if len == 0 {
            return match self.config.empty_bytes_padding {
                EmptyBytesPadding::FullWord => WORD,
                EmptyBytesPadding::Canonical => 0,
            };
        }
        (WORD - len % WORD) % WORD
    }

    /// Consume the encoder and return `head ++ tail` as raw bytes.
    ///
    /// # Panics
    ///
    /// If the head does not hold exactly the declared number of words.
    pub fn finalise_bytes(self) -> Vec<u8> {
        assert_eq!(
            self.head.len(),
            self.head_words * WORD,
            "head size mismatch: declared {} words",
            self.head_words
        );

        let mut out = self.head;
        out.unsplit(self.tail);
        out.to_vec()
    }

    /// Consume the encoder and return `0x` + head + tail.
    ///
    /// # Panics
    ///
    /// If the head does not hold exactly the declared number of words.
    pub fn finalise(self) -> String {
        hexutil::to_prefixed_hex(&self.finalise_bytes())
    }
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, AbiError> {
    let digits = hexutil::strip_0x(hex).ok_or(AbiError::MissingPrefix)?;
    hexutil::unhexlify(digits).ok_or_else(|| AbiError::InvalidHex(hex.to_string()))
}

/// Concatenate two `0x` hex strings into one
pub fn concat_hex(a: &str, b: &str) -> Result<String, AbiError> {
    let a = hexutil::strip_0x(a).ok_or(AbiError::MissingPrefix)?;
    let b = hexutil::strip_0x(b).ok_or(AbiError::MissingPrefix)?;
    Ok(format!("0x{}{}", a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(hex: &str) -> String {
        format!("{:0>64}", hex)
    }

    #[test]
    fn test_write_word_pads_left() {
        let mut enc = AbiEncoder::new(2);
        enc.write_word("0x01").unwrap();
        enc.write_word("0x").unwrap();
        assert_eq!(enc.finalise(), format!("0x{}{}", word("01"), word("")));
    }

    #[test]
    fn test_write_word_rejects_bad_hex() {
        let mut enc = AbiEncoder::new(1);
        assert_eq!(enc.write_word("01").unwrap_err(), AbiError::MissingPrefix);
        assert!(matches!(enc.write_word("0x0g"), Err(AbiError::InvalidHex(_))));
    }

    #[test]
    #[should_panic(expected = "word too long")]
    fn test_write_word_too_long_panics() {
        let mut enc = AbiEncoder::new(1);
        let _ = enc.write_word(&format!("0x{}", "00".repeat(33)));
    }

    #[test]
    fn test_write_string_hi() {
        let mut enc = AbiEncoder::new(1);
        enc.write_string("hi");
        assert_eq!(
            enc.finalise(),
            format!("0x{}{}{:0<64}", word("20"), word("02"), "6869")
        );
    }

    #[test]
    fn test_write_bytes_word_aligned() {
        let payload = "ab".repeat(32);
        let mut enc = AbiEncoder::new(1);
        enc.write_bytes(&format!("0x{}", payload)).unwrap();
        assert_eq!(
            enc.finalise(),
            format!("0x{}{}{}", word("20"), word("20"), payload)
        );
    }

    #[test]
    fn test_empty_bytes_full_word_padding() {
        let mut enc = AbiEncoder::new(1);
        enc.write_bytes("0x").unwrap();
        assert_eq!(
            enc.finalise(),
            format!("0x{}{}{}", word("20"), word("00"), word("00"))
        );
    }

    #[test]
    fn test_empty_bytes_canonical_padding() {
        let mut enc = AbiEncoder::with_config(1, EncoderConfig::canonical());
        enc.write_bytes("0x").unwrap();
        assert_eq!(enc.finalise(), format!("0x{}{}", word("20"), word("00")));
    }

    #[test]
    fn test_pointers_follow_tail() {
        let mut enc = AbiEncoder::new(3);
        enc.write_string("a");
        enc.write_u64(7);
        enc.write_string("b");

        let out = enc.finalise();
        let expected = format!(
            "0x{}{}{}{}{:0<64}{}{:0<64}",
            word("60"),
            word("07"),
            word("a0"),
            word("01"),
            "61",
            word("01"),
            "62"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_write_address() {
        let address = Address::from_hex("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let mut enc = AbiEncoder::new(1);
        enc.write_address(&address);
        assert_eq!(
            enc.finalise(),
            format!("0x{}", word("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"))
        );
    }

    #[test]
    fn test_write_u256_max() {
        let mut enc = AbiEncoder::new(1);
        enc.write_u256(U256::MAX);
        assert_eq!(enc.finalise(), format!("0x{}", "f".repeat(64)));
    }

    #[test]
    fn test_write_array_of_uints() {
        let mut enc = AbiEncoder::new(1);
        enc.write_array(2, |elements| {
            elements.write_u64(10);
            elements.write_u64(11);
            Ok(())
        })
        .unwrap();
        assert_eq!(
            enc.finalise(),
            format!("0x{}{}{}{}", word("20"), word("02"), word("0a"), word("0b"))
        );
    }

    #[test]
    fn test_write_empty_array() {
        let mut enc = AbiEncoder::new(1);
        enc.write_array(0, |_| Ok(())).unwrap();
        assert_eq!(enc.finalise(), format!("0x{}{}", word("20"), word("00")));
    }

    #[test]
    fn test_write_array_propagates_element_error() {
        let mut enc = AbiEncoder::new(1);
        let err = enc
            .write_array(1, |elements| elements.write_word("zz"))
            .unwrap_err();
        assert_eq!(err, AbiError::MissingPrefix);
    }

    #[test]
    #[should_panic(expected = "head size mismatch")]
    fn test_finalise_too_few_words_panics() {
        let mut enc = AbiEncoder::new(2);
        enc.write_u64(1);
        let _ = enc.finalise();
    }

    #[test]
    #[should_panic(expected = "head size mismatch")]
    fn test_finalise_too_many_words_panics() {
        let mut enc = AbiEncoder::new(1);
        enc.write_u64(1);
        enc.write_u64(2);
        let _ = enc.finalise();
    }

    #[test]
    fn test_finalise_empty() {
        assert_eq!(AbiEncoder::new(0).finalise(), "0x");
    }

    #[test]
    fn test_concat_hex() {
        assert_eq!(concat_hex("0xab", "0xcd").unwrap(), "0xabcd");
        assert_eq!(concat_hex("0x", "0x").unwrap(), "0x");
        assert_eq!(concat_hex("ab", "0xcd").unwrap_err(), AbiError::MissingPrefix);
        assert_eq!(concat_hex("0xab", "cd").unwrap_err(), AbiError::MissingPrefix);
    }
}
