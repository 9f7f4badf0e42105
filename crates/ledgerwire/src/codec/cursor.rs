// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Read/write cursors over caller-owned buffers.
//!
//! A cursor starts at an absolute offset and only ever moves forward. Every
//! access is bounds-checked; a short buffer yields `Error::TruncatedBuffer`
//! and leaves the offset where the failing access began.

use crate::config::{MAX_LENGTH_PREFIX, MAX_SEQUENCE_LENGTH};
use crate::error::{Error, Result};

/// Generate little-endian write methods for fixed-width integers.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> Result<()> {
            self.write_bytes(&value.to_le_bytes())
        }
    };
}

/// Generate little-endian read methods for fixed-width integers.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            Ok(<$type>::from_le_bytes(self.read_array::<$size>()?))
        }
    };
}

/// Generate methods shared by `Cursor` and `CursorMut`.
macro_rules! impl_cursor_common {
    () => {
        /// Absolute offset of the next byte to be accessed.
        pub fn offset(&self) -> usize {
            self.offset
        }

        /// Bytes left between the offset and the end of the buffer.
        pub fn remaining(&self) -> usize {
            self.buffer.len().saturating_sub(self.offset)
        }

        /// Total buffer length, independent of the offset.
        pub fn len(&self) -> usize {
            self.buffer.len()
        }

        pub fn is_empty(&self) -> bool {
            self.buffer.is_empty()
        }

        fn ensure(&self, needed: usize) -> Result<()> {
            match self.offset.checked_add(needed) {
                Some(end) if end <= self.buffer.len() => Ok(()),
                _ => Err(Error::TruncatedBuffer {
                    offset: self.offset,
                    needed,
                    available: self.remaining(),
                }),
            }
        }
    };
}

/// Mutable cursor for writing (bounds-checked, zero-copy)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self::at(buffer, 0)
    }

    /// Start writing at an absolute offset inside `buffer`.
    pub fn at(buffer: &'a mut [u8], offset: usize) -> Self {
        Self { buffer, offset }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_u16_le, u16);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_u64_le, u64);
    impl_write_le!(write_u128_le, u128);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_i16_le, i16);
    impl_write_le!(write_i32_le, i32);
    impl_write_le!(write_i64_le, i64);
    impl_write_le!(write_i128_le, i128);

    /// Canonical bool: `1` for true, `0` for false.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.ensure(data.len())?;
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    /// Write a 4-byte element-count prefix.
    ///
    /// Counts above `i32::MAX` are rejected, never truncated.
    pub fn write_len(&mut self, len: usize, context: &'static str) -> Result<()> {
        if len > MAX_LENGTH_PREFIX {
            return Err(Error::LengthOverflow {
                context,
                len,
                limit: MAX_LENGTH_PREFIX,
            });
        }
        // Bounded by the check above.
        self.write_u32_le(len as u32)
    }

    impl_cursor_common!();
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::at(buffer, 0)
    }

    /// Start reading at an absolute offset inside `buffer`.
    pub fn at(buffer: &'a [u8], offset: usize) -> Self {
        Self { buffer, offset }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_u128_le, u128, 16);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_i16_le, i16, 2);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_i64_le, i64, 8);
    impl_read_le!(read_i128_le, i128, 16);

    /// Strict bool: `0` is false, `1` is true, anything else is rejected.
    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => {
                self.offset = offset;
                Err(Error::InvalidBool { offset, value })
            }
        }
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.read_bytes(N)?);
        Ok(bytes)
    }

    /// Look at the next `len` bytes without consuming them.
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        Ok(&self.buffer[self.offset..self.offset + len])
    }

    /// Read a 4-byte element-count prefix and validate it before any element
    /// is touched.
    ///
    /// `min_element_len` is the smallest encoding a single element can have;
    /// a count whose minimum footprint exceeds the remaining buffer fails
    /// with `TruncatedBuffer` without allocating.
    pub fn read_len(&mut self, context: &'static str, min_element_len: usize) -> Result<usize> {
        let start = self.offset;
        let len = self.read_u32_le()? as usize;
        if len > MAX_SEQUENCE_LENGTH {
            self.offset = start;
            return Err(Error::LengthOverflow {
                context,
                len,
                limit: MAX_SEQUENCE_LENGTH,
            });
        }
        let needed = len.saturating_mul(min_element_len);
        if needed > self.remaining() {
            let err = Error::TruncatedBuffer {
                offset: self.offset,
                needed,
                available: self.remaining(),
            };
            self.offset = start;
            return Err(err);
        }
        Ok(len)
    }

    impl_cursor_common!();

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
