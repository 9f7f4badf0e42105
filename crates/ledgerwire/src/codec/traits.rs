// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Encoding/decoding contract shared by primitives, framing, unions and
//! generated records.

use super::cursor::{Cursor, CursorMut};
use crate::error::Result;

/// Types that can be written to the little-endian record layout.
pub trait Encode {
    /// Encoded width when it does not depend on the value.
    ///
    /// `None` for variable-width shapes (vectors, strings, optionals).
    const FIXED_LEN: Option<usize> = None;

    /// Exact number of bytes `encode` will write for this value.
    fn encoded_len(&self) -> usize;

    /// Write this value at the cursor, advancing it by `encoded_len()`.
    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()>;

    /// Write at an absolute offset inside `dst`.
    ///
    /// # Returns
    /// Number of bytes written
    fn write_at(&self, dst: &mut [u8], offset: usize) -> Result<usize> {
        let mut out = CursorMut::at(dst, offset);
        self.encode(&mut out)?;
        Ok(out.offset() - offset)
    }

    /// Encode into a freshly allocated, exactly-sized buffer.
    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.encoded_len()];
        let written = self.write_at(&mut buf, 0)?;
        buf.truncate(written);
        Ok(buf)
    }
}

/// Types that can be read back from the little-endian record layout.
pub trait Decode: Sized {
    /// Smallest number of bytes any encoding of this type occupies.
    ///
    /// Used to reject impossible element counts before allocating. There is
    /// no default: a hand-written impl must state it, and understating it
    /// only weakens that early rejection.
    const MIN_LEN: usize;

    /// Read one value at the cursor, advancing it past the value.
    fn decode(input: &mut Cursor<'_>) -> Result<Self>;

    /// Read at an absolute offset inside `src`.
    ///
    /// # Returns
    /// Tuple of (decoded value, bytes consumed)
    fn read_at(src: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut input = Cursor::at(src, offset);
        let value = Self::decode(&mut input)?;
        Ok((value, input.offset() - offset))
    }

    /// Read one value from the start of `src`. Trailing bytes are ignored.
    fn from_slice(src: &[u8]) -> Result<Self> {
        Self::read_at(src, 0).map(|(value, _)| value)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    const FIXED_LEN: Option<usize> = T::FIXED_LEN;

    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        (**self).encode(out)
    }
}

impl<T: Encode> Encode for Box<T> {
    const FIXED_LEN: Option<usize> = T::FIXED_LEN;

    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        (**self).encode(out)
    }
}

impl<T: Decode> Decode for Box<T> {
    const MIN_LEN: usize = T::MIN_LEN;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        T::decode(input).map(Box::new)
    }
}

// ============================================================================
// Const helpers for layout arithmetic (used by generated code)
// ============================================================================

/// Sum of field widths, or `None` if any field is variable-width.
pub const fn sum_fixed(lens: &[Option<usize>]) -> Option<usize> {
    let mut total = 0;
    let mut i = 0;
    while i < lens.len() {
        match lens[i] {
            Some(len) => total += len,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}

/// Width of `count` repetitions of a fixed element.
pub const fn repeat_fixed(len: Option<usize>, count: usize) -> Option<usize> {
    match len {
        Some(len) => Some(len * count),
        None => None,
    }
}

/// Unwrap a width that the layout guarantees to be fixed.
///
/// Evaluated in const context by generated offset constants; a variable
/// field marked fixed fails the build here.
pub const fn fixed_width(len: Option<usize>) -> usize {
    match len {
        Some(len) => len,
        None => panic!("field preceding an offset constant is not fixed-width"),
    }
}

/// Smallest of a set of minimum widths (`0` for an empty set).
pub const fn min_of(lens: &[usize]) -> usize {
    if lens.is_empty() {
        return 0;
    }
    let mut min = lens[0];
    let mut i = 1;
    while i < lens.len() {
        if lens[i] < min {
            min = lens[i];
        }
        i += 1;
    }
    min
}
