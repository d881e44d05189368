//! Bounds-checked 32-byte word reads over an ABI-encoded buffer.
//!
//! Every read takes an absolute offset and an exclusive `end` no greater than the
//! buffer length; nothing here can panic or overflow on adversarial input.

use alloy_primitives::{B256, U256};

use crate::errors::DecodeError;

pub const WORD: usize = 32;

/// Borrow the 32-byte word at `offset`.
pub fn read_word(bytes: &[u8], offset: usize, end: usize) -> Result<&[u8; WORD], DecodeError> {
    let slice = read_slice(bytes, offset, WORD, end)?;
    slice.try_into().map_err(|_| DecodeError::OutOfBounds { offset, len: WORD })
}

pub fn read_b256(bytes: &[u8], offset: usize, end: usize) -> Result<B256, DecodeError> {
    read_word(bytes, offset, end).map(|word| B256::from(*word))
}

pub fn read_u256(bytes: &[u8], offset: usize, end: usize) -> Result<U256, DecodeError> {
    read_word(bytes, offset, end).map(|word| U256::from_be_bytes(*word))
}

/// Read a word holding an offset or a length, rejecting anything above `u64`.
pub fn read_usize(bytes: &[u8], offset: usize, end: usize) -> Result<usize, DecodeError> {
    let word = read_word(bytes, offset, end)?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(DecodeError::OffsetOverflow);
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(buf)).map_err(|_| DecodeError::OffsetOverflow)
}

/// Borrow `len` bytes at `offset`, requiring `offset + len <= end`.
pub fn read_slice(bytes: &[u8], offset: usize, len: usize, end: usize) -> Result<&[u8], DecodeError> {
    let stop = offset.checked_add(len).ok_or(DecodeError::OffsetOverflow)?;
    if stop > end.min(bytes.len()) {
        return Err(DecodeError::OutOfBounds { offset, len });
    }
    Ok(&bytes[offset..stop])
}

/// Round `len` up to a whole number of words.
pub fn ceil32(len: usize) -> Result<usize, DecodeError> {
    len.checked_add(WORD - 1)
        .map(|n| n / WORD * WORD)
        .ok_or(DecodeError::OffsetOverflow)
}

/// `offset + words * 32`, checked.
pub fn advance_words(offset: usize, words: usize) -> Result<usize, DecodeError> {
    words
        .checked_mul(WORD)
        .and_then(|n| offset.checked_add(n))
        .ok_or(DecodeError::OffsetOverflow)
}
