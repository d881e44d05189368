//! Head/tail navigation of ABI-encoded calldata.
//!
//! A [`Scope`] describes one container being decoded: offsets of its dynamic
//! children are relative to `base`, its head starts at `head`, and nothing in it
//! may extend past `end`.

use crate::{
    errors::DecodeError,
    utils::bytes::{advance_words, ceil32, read_slice, read_usize, WORD},
};

const SELECTOR_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scope {
    pub base: usize,
    pub head: usize,
    pub end: usize,
}

impl Scope {
    /// Parameters of a top-level call, right after the selector.
    pub fn root(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < SELECTOR_LEN {
            return Err(DecodeError::MissingSelector);
        }
        Ok(Self { base: SELECTOR_LEN, head: SELECTOR_LEN, end: data.len() })
    }

    /// A tuple encoded at `location`.
    pub fn tuple(&self, location: usize) -> Self {
        Self { base: location, head: location, end: self.end }
    }

    /// A tuple encoded in place inside this scope's head.
    pub fn inline_tuple(&self, location: usize) -> Self {
        Self { base: self.base, head: location, end: self.end }
    }

    /// Elements of an array whose length word sits at `location`. The array
    /// must hold exactly `expected` elements.
    pub fn array(&self, data: &[u8], location: usize, expected: usize) -> Result<Self, DecodeError> {
        let actual = read_usize(data, location, self.end)?;
        if actual != expected {
            return Err(DecodeError::LengthMismatch { expected, actual });
        }
        let base = advance_words(location, 1)?;
        Ok(Self { base, head: base, end: self.end })
    }

    /// Parameters of a call embedded as `bytes` at `location`.
    pub fn calldata(&self, data: &[u8], location: usize) -> Result<Self, DecodeError> {
        let len = read_usize(data, location, self.end)?;
        if len < SELECTOR_LEN {
            return Err(DecodeError::MissingSelector);
        }
        let payload = advance_words(location, 1)?;
        let end = payload.checked_add(len).ok_or(DecodeError::OffsetOverflow)?;
        if end > self.end {
            return Err(DecodeError::OutOfBounds { offset: payload, len });
        }
        let base = payload + SELECTOR_LEN;
        Ok(Self { base, head: base, end })
    }
}

/// Resolve where a child whose head slot is at `slot` is encoded: in place when
/// `inline`, otherwise at `base` plus the offset stored in the slot.
pub fn locate(data: &[u8], scope: &Scope, slot: usize, inline: bool) -> Result<usize, DecodeError> {
    if inline {
        return Ok(slot);
    }
    let offset = read_usize(data, slot, scope.end)?;
    let location = scope.base.checked_add(offset).ok_or(DecodeError::OffsetOverflow)?;
    if location >= scope.end {
        return Err(DecodeError::OutOfBounds { offset: location, len: WORD });
    }
    Ok(location)
}

/// Borrow a dynamic value at `location` as its length word followed by the
/// zero-padded payload.
pub fn dynamic<'a>(data: &'a [u8], scope: &Scope, location: usize) -> Result<&'a [u8], DecodeError> {
    let len = read_usize(data, location, scope.end)?;
    let total = ceil32(len)?.checked_add(WORD).ok_or(DecodeError::OffsetOverflow)?;
    read_slice(data, location, total, scope.end)
}
