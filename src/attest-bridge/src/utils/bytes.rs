//! Minimal big-endian helpers.
//!
//! Readers are used for decoding fixed-layout tags; the `*_word` builders produce the 32-byte
//! ABI words that typed-data hashing and deposit source hashing are built from.

use alloy_primitives::{Address, B256, U256};

use crate::errors::CodecError;

/// Read `N` bytes at the cursor and advance it. Fails with `CodecError::Truncated` if fewer remain.
pub fn read_array<const N: usize>(bytes: &[u8], i: &mut usize) -> Result<[u8; N], CodecError> {
    if bytes.len() < *i + N {
        return Err(CodecError::Truncated);
    }
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[*i..*i + N]);
    *i += N;
    Ok(buf)
}

pub fn read_u32_be(bytes: &[u8], i: &mut usize) -> Result<u32, CodecError> {
    read_array::<4>(bytes, i).map(u32::from_be_bytes)
}

/// Address left-padded into a 32-byte word.
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}

pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..32].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn bool_word(value: bool) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = value as u8;
    word
}

pub fn u256_word(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

/// Concatenate 32-byte words, i.e. `abi.encode` of static arguments.
pub fn encode_words(words: &[[u8; 32]]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(32 * words.len());
    for word in words {
        buf.extend_from_slice(word);
    }
    buf
}

pub fn b256_word(value: B256) -> [u8; 32] {
    value.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_read_u32_be_advances_cursor() {
        let bytes = [0, 0, 0, 7, 0, 0, 1, 0];
        let mut i = 0;
        assert_eq!(read_u32_be(&bytes, &mut i), Ok(7));
        assert_eq!(read_u32_be(&bytes, &mut i), Ok(256));
        assert_eq!(i, 8);
        assert_eq!(read_u32_be(&bytes, &mut i), Err(CodecError::Truncated));
    }

    #[test]
    fn test_read_array_short_input_leaves_cursor() {
        let bytes = [1u8, 2, 3];
        let mut i = 1;
        assert_eq!(read_array::<3>(&bytes, &mut i), Err(CodecError::Truncated));
        assert_eq!(i, 1);
        assert_eq!(read_array::<2>(&bytes, &mut i), Ok([2, 3]));
    }

    #[test]
    fn test_words_are_left_padded() {
        let addr = address!("00000000000000000000000000000000000000aa");
        assert_eq!(address_word(addr)[31], 0xaa);
        assert!(address_word(addr)[..31].iter().all(|b| *b == 0));
        assert_eq!(u64_word(0x0102)[30..], [0x01, 0x02]);
        assert_eq!(bool_word(true)[31], 1);
        assert_eq!(encode_words(&[u64_word(1), bool_word(false)]).len(), 64);
    }
}
