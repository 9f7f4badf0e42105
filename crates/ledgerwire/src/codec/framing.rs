// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Optional and collection framing.
//!
//! ```text
//! Option<T>   absent  -> 00
//!             present -> 01 <T>
//! Vec<T>      <u32 LE count> <T> <T> ...
//! String      <u32 LE byte length> <UTF-8 bytes>        (no terminator)
//! [T; N]      <T> x N                                   (no prefix)
//! ```
//!
//! An empty vector still writes its 4-byte zero prefix; only an enclosing
//! `Option` can omit a field entirely. Element sizes are never prefixed
//! individually, so decoding variable-width elements accumulates consumed
//! bytes through the cursor.

use super::cursor::{Cursor, CursorMut};
use super::traits::{repeat_fixed, sum_fixed, Decode, Encode};
use crate::config::{LENGTH_PREFIX_LEN, OPTION_FLAG_LEN};
use crate::error::{Error, Result};

// ============================================================================
// Optional values
// ============================================================================

/// Write a presence flag followed by the value when present.
pub fn write_optional<T: Encode + ?Sized>(value: Option<&T>, out: &mut CursorMut<'_>) -> Result<()> {
    match value {
        None => out.write_u8(0),
        Some(inner) => {
            out.write_u8(1)?;
            inner.encode(out)
        }
    }
}

/// Read a presence flag and, when set, the value via `reader`.
pub fn read_optional<'a, T, F>(input: &mut Cursor<'a>, reader: F) -> Result<Option<T>>
where
    F: FnOnce(&mut Cursor<'a>) -> Result<T>,
{
    if input.read_bool()? {
        reader(input).map(Some)
    } else {
        Ok(None)
    }
}

/// Encoded length of an optional value.
pub fn len_optional<T: Encode + ?Sized>(value: Option<&T>) -> usize {
    OPTION_FLAG_LEN + value.map_or(0, Encode::encoded_len)
}

impl<T: Encode> Encode for Option<T> {
    fn encoded_len(&self) -> usize {
        len_optional(self.as_ref())
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        write_optional(self.as_ref(), out)
    }
}

impl<T: Decode> Decode for Option<T> {
    const MIN_LEN: usize = OPTION_FLAG_LEN;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        read_optional(input, T::decode)
    }
}

// ============================================================================
// Vectors
// ============================================================================

/// Write a count prefix followed by every element in order.
pub fn write_vector<T: Encode>(elements: &[T], out: &mut CursorMut<'_>) -> Result<()> {
    out.write_len(elements.len(), "vector")?;
    for element in elements {
        element.encode(out)?;
    }
    Ok(())
}

/// Read a count prefix and that many elements through `reader`.
///
/// `min_element_len` is the smallest encoding one element can have; it lets
/// an impossible count fail before anything is allocated.
pub fn read_vector_with<'a, T, F>(
    input: &mut Cursor<'a>,
    min_element_len: usize,
    mut reader: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut Cursor<'a>) -> Result<T>,
{
    let len = input.read_len("vector", min_element_len)?;
    // Capped by the bytes left: a small `min_element_len` must not let a
    // large count preallocate.
    let mut elements = Vec::with_capacity(len.min(input.remaining()));
    for _ in 0..len {
        elements.push(reader(input)?);
    }
    Ok(elements)
}

/// Read a count-prefixed vector of `T`.
pub fn read_vector<T: Decode>(input: &mut Cursor<'_>) -> Result<Vec<T>> {
    read_vector_with(input, T::MIN_LEN, T::decode)
}

/// Encoded length of a count-prefixed vector.
pub fn len_vector<T: Encode>(elements: &[T]) -> usize {
    match T::FIXED_LEN {
        Some(width) => LENGTH_PREFIX_LEN + width * elements.len(),
        None => LENGTH_PREFIX_LEN + elements.iter().map(Encode::encoded_len).sum::<usize>(),
    }
}

/// Fill `dst` with exactly `dst.len()` elements, no count prefix.
///
/// # Returns
/// Number of bytes consumed
pub fn read_array_into<T: Decode>(input: &mut Cursor<'_>, dst: &mut [T]) -> Result<usize> {
    let start = input.offset();
    for slot in dst.iter_mut() {
        *slot = T::decode(input)?;
    }
    Ok(input.offset() - start)
}

/// Write every element of `src` back-to-back, no count prefix.
pub fn write_array<T: Encode>(src: &[T], out: &mut CursorMut<'_>) -> Result<()> {
    for element in src {
        element.encode(out)?;
    }
    Ok(())
}

impl<T: Encode> Encode for Vec<T> {
    fn encoded_len(&self) -> usize {
        len_vector(self)
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        write_vector(self, out)
    }
}

impl<T: Decode> Decode for Vec<T> {
    const MIN_LEN: usize = LENGTH_PREFIX_LEN;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        read_vector(input)
    }
}

// ============================================================================
// Multi-dimensional vectors
// ============================================================================

/// Write a vector of vectors; each inner vector carries its own prefix.
pub fn write_vector_2d<T: Encode>(rows: &[Vec<T>], out: &mut CursorMut<'_>) -> Result<()> {
    write_vector(rows, out)
}

/// Read a vector of vectors. Row widths are only known after each row's
/// prefix has been read.
pub fn read_vector_2d<T: Decode>(input: &mut Cursor<'_>) -> Result<Vec<Vec<T>>> {
    read_vector_with(input, LENGTH_PREFIX_LEN, read_vector::<T>)
}

/// Encoded length of a vector of vectors.
pub fn len_vector_2d<T: Encode>(rows: &[Vec<T>]) -> usize {
    LENGTH_PREFIX_LEN + rows.iter().map(|row| len_vector(row)).sum::<usize>()
}

// ============================================================================
// Fixed arrays
// ============================================================================

impl<T: Encode, const N: usize> Encode for [T; N] {
    const FIXED_LEN: Option<usize> = repeat_fixed(T::FIXED_LEN, N);

    fn encoded_len(&self) -> usize {
        match T::FIXED_LEN {
            Some(width) => width * N,
            None => self.iter().map(Encode::encoded_len).sum(),
        }
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        write_array(self, out)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    const MIN_LEN: usize = T::MIN_LEN * N;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let mut elements = Vec::with_capacity(N.min(input.remaining()));
        for _ in 0..N {
            elements.push(T::decode(input)?);
        }
        match elements.try_into() {
            Ok(array) => Ok(array),
            Err(_) => unreachable!("loop pushed exactly {} elements", N),
        }
    }
}

// ============================================================================
// Strings
// ============================================================================

/// Write a UTF-8 string as a byte-length prefix and raw bytes.
pub fn write_string(value: &str, out: &mut CursorMut<'_>) -> Result<()> {
    out.write_len(value.len(), "string")?;
    out.write_bytes(value.as_bytes())
}

/// Read a length-prefixed UTF-8 string.
///
/// The declared length is checked against the remaining buffer before the
/// payload is touched.
pub fn read_string(input: &mut Cursor<'_>) -> Result<String> {
    let len = input.read_len("string", 1)?;
    let offset = input.offset();
    let bytes = input.read_bytes(len)?;
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| Error::InvalidUtf8 { offset })
}

/// Encoded length of a string.
pub fn len_string(value: &str) -> usize {
    LENGTH_PREFIX_LEN + value.len()
}

impl Encode for str {
    fn encoded_len(&self) -> usize {
        len_string(self)
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        write_string(self, out)
    }
}

impl Encode for String {
    fn encoded_len(&self) -> usize {
        len_string(self)
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        write_string(self, out)
    }
}

impl Decode for String {
    const MIN_LEN: usize = LENGTH_PREFIX_LEN;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        read_string(input)
    }
}

// ============================================================================
// Tuples
// ============================================================================

macro_rules! impl_tuple_codec {
    ($($name:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            const FIXED_LEN: Option<usize> = sum_fixed(&[$($name::FIXED_LEN),+]);

            #[allow(non_snake_case)]
            fn encoded_len(&self) -> usize {
                let ($($name,)+) = self;
                0 $(+ $name.encoded_len())+
            }

            #[allow(non_snake_case)]
            fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
                let ($($name,)+) = self;
                $($name.encode(out)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            const MIN_LEN: usize = 0 $(+ $name::MIN_LEN)+;

            fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                Ok(($($name::decode(input)?,)+))
            }
        }
    };
}

// Empty argument list (instructions without arguments).
impl Encode for () {
    const FIXED_LEN: Option<usize> = Some(0);

    fn encoded_len(&self) -> usize {
        0
    }

    fn encode(&self, _out: &mut CursorMut<'_>) -> Result<()> {
        Ok(())
    }
}

impl Decode for () {
    const MIN_LEN: usize = 0;

    fn decode(_input: &mut Cursor<'_>) -> Result<Self> {
        Ok(())
    }
}

impl_tuple_codec!(A);
impl_tuple_codec!(A, B);
impl_tuple_codec!(A, B, C);
impl_tuple_codec!(A, B, C, D);
