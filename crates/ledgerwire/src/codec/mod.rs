// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Little-endian record codec.
//!
//! # Module Organization
//!
//! - [`cursor`] - bounds-checked `Cursor`/`CursorMut`
//! - [`traits`] - `Encode`/`Decode` contract and const layout helpers
//! - [`primitives`] - integers, bools, fixed bytes, identifiers
//! - [`framing`] - optionals, vectors, strings, fixed and nested arrays
//! - [`union`] - tagged unions (ordinal + payload)
//!
//! Layout is schema-less: there is no alignment padding, no per-field tag
//! and no trailing terminator. Reader and writer must agree on the field
//! list ahead of time.

pub mod cursor;
pub mod framing;
pub mod primitives;
pub mod traits;
pub mod union;

pub use cursor::{Cursor, CursorMut};
pub use framing::{
    len_optional, len_string, len_vector, len_vector_2d, read_array_into, read_optional,
    read_string, read_vector, read_vector_2d, read_vector_with, write_array, write_optional,
    write_string, write_vector, write_vector_2d,
};
pub use traits::{fixed_width, min_of, repeat_fixed, sum_fixed, Decode, Encode};
pub use union::{
    read_variant, union_fixed_len, unknown_ordinal, write_variant, TaggedUnion, VariantReader,
};
