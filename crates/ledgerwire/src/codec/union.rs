// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Tagged-union codec.
//!
//! Wire form is `<u8 ordinal><variant payload>`. Ordinals are 0-based in
//! declaration order and never reused. The variant set is closed: an ordinal
//! outside the table is `Error::UnknownOrdinal`, there is no fallback
//! variant.
//!
//! Payload shape (empty, one scalar, a structured record) only matters to
//! the per-variant reader/writer; dispatch is identical for all three.

use super::cursor::{Cursor, CursorMut};
use crate::config::ORDINAL_LEN;
use crate::error::{Error, Result};

/// Reader for one variant's payload, called with the cursor just past the
/// ordinal byte.
pub type VariantReader<T> = fn(&mut Cursor<'_>) -> Result<T>;

/// Closed sum type encoded as ordinal + payload.
///
/// Implemented by `#[derive(Layout)]` on enums.
pub trait TaggedUnion {
    /// Name reported in `UnknownOrdinal` errors.
    const TYPE_NAME: &'static str;

    /// Number of variants; valid ordinals are `0..VARIANT_COUNT`.
    const VARIANT_COUNT: usize;

    /// Ordinal of this value's variant.
    fn ordinal(&self) -> u8;
}

/// Write the ordinal, then the payload via `write_payload`.
///
/// # Returns
/// Bytes written (`1 + payload length`)
pub fn write_variant<F>(out: &mut CursorMut<'_>, ordinal: u8, write_payload: F) -> Result<usize>
where
    F: FnOnce(&mut CursorMut<'_>) -> Result<()>,
{
    let start = out.offset();
    out.write_u8(ordinal)?;
    write_payload(out)?;
    Ok(out.offset() - start)
}

/// Read an ordinal and dispatch to the matching reader in `table`.
///
/// `table[i]` decodes the payload of ordinal `i`.
pub fn read_variant<T>(
    input: &mut Cursor<'_>,
    type_name: &'static str,
    table: &[VariantReader<T>],
) -> Result<T> {
    let ordinal = input.read_u8()?;
    match table.get(usize::from(ordinal)) {
        Some(reader) => reader(input),
        None => Err(unknown_ordinal(type_name, ordinal)),
    }
}

/// Build (and log) the error for an ordinal outside the variant table.
pub fn unknown_ordinal(type_name: &'static str, ordinal: u8) -> Error {
    log::debug!("[union] unknown ordinal {} for {}", ordinal, type_name);
    Error::UnknownOrdinal { type_name, ordinal }
}

/// Fixed width of a union whose variant payloads all share one fixed width.
///
/// Unions whose payloads differ in width are variable-length.
pub const fn union_fixed_len(payloads: &[Option<usize>]) -> Option<usize> {
    if payloads.is_empty() {
        return None;
    }
    let width = match payloads[0] {
        Some(width) => width,
        None => return None,
    };
    let mut i = 1;
    while i < payloads.len() {
        match payloads[i] {
            Some(other) if other == width => {}
            _ => return None,
        }
        i += 1;
    }
    Some(ORDINAL_LEN + width)
}
