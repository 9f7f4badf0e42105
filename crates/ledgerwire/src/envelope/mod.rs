// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Discriminator envelope for stored records and instruction payloads.
//!
//! Every discriminated record starts with an 8-byte tag at offset 0, followed
//! by its fields at offset 8. Instruction payloads use the same layout with
//! the instruction's discriminator and its argument record.

pub mod discriminator;
pub mod registry;

pub use discriminator::{expect_discriminator, read_discriminator, Discriminator};
pub use registry::{DecoderRegistry, RecordDecoder};

use crate::codec::{CursorMut, Encode};
use crate::error::Result;

/// Record or instruction type carrying a fixed 8-byte discriminator.
///
/// Implemented by `#[derive(Layout)]` when a `#[layout(..)]` discriminator
/// attribute is present.
pub trait Discriminated {
    const DISCRIMINATOR: Discriminator;

    /// Offset-0 filter selecting records of this type.
    fn discriminator_filter() -> crate::filter::Filter {
        Self::DISCRIMINATOR.filter()
    }
}

/// Build an instruction payload: discriminator followed by encoded `args`.
pub fn instruction_data<A: Encode + ?Sized>(discriminator: Discriminator, args: &A) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; Discriminator::LEN + args.encoded_len()];
    let mut out = CursorMut::new(&mut buf);
    discriminator.encode(&mut out)?;
    args.encode(&mut out)?;
    let written = out.offset();
    buf.truncate(written);
    Ok(buf)
}
