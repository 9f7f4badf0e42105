// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Primitive codec: fixed-width little-endian integers, booleans, fixed byte
//! runs and 32-byte identifiers.
//!
//! Two equivalent surfaces are provided:
//!
//! - offset functions (`read_i64(buf, offset)`, `write_i64(buf, offset, v)`)
//!   for code that tracks its own position, and
//! - `Encode`/`Decode` impls used when composing records over a cursor.
//!
//! 128-bit values use native `i128`/`u128` (two's complement over 16 bytes).

use super::cursor::{Cursor, CursorMut};
use super::traits::{Decode, Encode};
use crate::error::Result;
use crate::types::Identifier;

macro_rules! impl_int_codec {
    ($type:ty, $size:expr, $write:ident, $read:ident) => {
        impl Encode for $type {
            const FIXED_LEN: Option<usize> = Some($size);

            fn encoded_len(&self) -> usize {
                $size
            }

            fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
                out.$write(*self)
            }
        }

        impl Decode for $type {
            const MIN_LEN: usize = $size;

            fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                input.$read()
            }
        }
    };
}

impl_int_codec!(u8, 1, write_u8, read_u8);
impl_int_codec!(u16, 2, write_u16_le, read_u16_le);
impl_int_codec!(u32, 4, write_u32_le, read_u32_le);
impl_int_codec!(u64, 8, write_u64_le, read_u64_le);
impl_int_codec!(u128, 16, write_u128_le, read_u128_le);
impl_int_codec!(i8, 1, write_i8, read_i8);
impl_int_codec!(i16, 2, write_i16_le, read_i16_le);
impl_int_codec!(i32, 4, write_i32_le, read_i32_le);
impl_int_codec!(i64, 8, write_i64_le, read_i64_le);
impl_int_codec!(i128, 16, write_i128_le, read_i128_le);
impl_int_codec!(bool, 1, write_bool, read_bool);

// ============================================================================
// Offset functions
// ============================================================================

macro_rules! impl_offset_fns {
    ($read:ident, $write:ident, $type:ty) => {
        #[doc = concat!("Read a little-endian `", stringify!($type), "` at `offset`.")]
        pub fn $read(src: &[u8], offset: usize) -> Result<$type> {
            <$type>::decode(&mut Cursor::at(src, offset))
        }

        #[doc = concat!("Write a little-endian `", stringify!($type), "` at `offset`; returns bytes written.")]
        pub fn $write(dst: &mut [u8], offset: usize, value: $type) -> Result<usize> {
            value.write_at(dst, offset)
        }
    };
}

impl_offset_fns!(read_u8, write_u8, u8);
impl_offset_fns!(read_u16, write_u16, u16);
impl_offset_fns!(read_u32, write_u32, u32);
impl_offset_fns!(read_u64, write_u64, u64);
impl_offset_fns!(read_u128, write_u128, u128);
impl_offset_fns!(read_i8, write_i8, i8);
impl_offset_fns!(read_i16, write_i16, i16);
impl_offset_fns!(read_i32, write_i32, i32);
impl_offset_fns!(read_i64, write_i64, i64);
impl_offset_fns!(read_i128, write_i128, i128);
impl_offset_fns!(read_bool, write_bool, bool);

/// Borrow `len` bytes starting at `offset`.
pub fn read_fixed_bytes(src: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    Cursor::at(src, offset).read_bytes(len)
}

/// Copy `bytes` into `dst` at `offset`; returns bytes written.
pub fn write_fixed_bytes(dst: &mut [u8], offset: usize, bytes: &[u8]) -> Result<usize> {
    CursorMut::at(dst, offset).write_bytes(bytes)?;
    Ok(bytes.len())
}

/// Read a 32-byte identifier at `offset`.
pub fn read_identifier(src: &[u8], offset: usize) -> Result<Identifier> {
    Identifier::decode(&mut Cursor::at(src, offset))
}

/// Write a 32-byte identifier at `offset`; returns bytes written.
pub fn write_identifier(dst: &mut [u8], offset: usize, value: &Identifier) -> Result<usize> {
    value.write_at(dst, offset)
}
