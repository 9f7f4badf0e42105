// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Server-side account query filters.
//!
//! A filter is a pure description handed to a remote query API: either an
//! exact byte pattern at a fixed offset of the stored record, or an exact
//! total record size. Filters are built from known field offsets and fixed
//! record widths; this module never talks to the network.

use crate::codec::Encode;
use crate::error::{Error, Result};

/// Record selection predicate evaluated by the storage node.
///
/// Prefer [`Filter::memcmp`] over building `Memcmp` by hand: the variant
/// fields are public, so a literal can carry the empty pattern the
/// constructor rejects. Such a filter never matches locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `bytes` must appear verbatim starting at `offset`.
    Memcmp { offset: usize, bytes: Vec<u8> },
    /// Record must be exactly this many bytes long.
    DataSize(usize),
}

impl Filter {
    /// Offset filter over raw bytes. An empty pattern is rejected.
    pub fn memcmp(offset: usize, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::EmptyFilterPattern);
        }
        Ok(Filter::Memcmp { offset, bytes })
    }

    /// Offset filter matching the encoding of `value`.
    pub fn memcmp_value<T: Encode + ?Sized>(offset: usize, value: &T) -> Result<Self> {
        Self::memcmp(offset, value.to_vec()?)
    }

    pub const fn data_size(size: usize) -> Self {
        Filter::DataSize(size)
    }

    /// Check a local copy of a record, e.g. in tests or when pruning a
    /// cache. Queries are evaluated by the storage node, not here.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Filter::Memcmp { bytes, .. } if bytes.is_empty() => false,
            Filter::Memcmp { offset, bytes } => offset
                .checked_add(bytes.len())
                .and_then(|end| data.get(*offset..end))
                .is_some_and(|window| window == bytes.as_slice()),
            Filter::DataSize(size) => data.len() == *size,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Filter::Memcmp { offset, .. } => Some(*offset),
            Filter::DataSize(_) => None,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Filter::Memcmp { bytes, .. } => Some(bytes),
            Filter::DataSize(_) => None,
        }
    }
}
