// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! # ledgerwire - compact binary records for ledger program runtimes
//!
//! Schema-less, little-endian serialization of the records stored and
//! exchanged by on-chain programs, plus the helpers clients need around it:
//! 8-byte discriminator envelopes, server-side query filters built from
//! field offsets, and program-derived address calculation.
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerwire::{Decode, Encode, Identifier, Layout, Result};
//!
//! #[derive(Layout, Debug, PartialEq)]
//! #[layout(account)]
//! struct BondingCurve {
//!     virtual_token_reserves: i64,
//!     virtual_sol_reserves: i64,
//!     real_token_reserves: i64,
//!     real_sol_reserves: i64,
//!     token_total_supply: i64,
//!     complete: bool,
//! }
//!
//! fn main() -> Result<()> {
//!     let curve = BondingCurve {
//!         virtual_token_reserves: 1_073_000_000,
//!         virtual_sol_reserves: 30_000_000_000,
//!         real_token_reserves: 793_100_000,
//!         real_sol_reserves: 0,
//!         token_total_supply: 1_000_000_000,
//!         complete: false,
//!     };
//!     let bytes = curve.to_vec()?;
//!     assert_eq!(bytes.len(), 49);
//!     assert_eq!(BondingCurve::COMPLETE_OFFSET, 48);
//!     assert_eq!(BondingCurve::from_slice(&bytes)?, curve);
//!
//!     // Query filter: completed curves only.
//!     let filter = BondingCurve::complete_filter(&true)?;
//!     assert!(!filter.matches(&bytes));
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! integers      little-endian, two's complement, 1/2/4/8/16 bytes
//! bool          00 | 01
//! identifier    32 raw bytes
//! Option<T>     00 | 01 <T>
//! Vec<T>        <u32 count> <T>*
//! String        <u32 byte length> <UTF-8>
//! [T; N]        <T> x N
//! enum          <u8 ordinal> <payload>
//! record        [<8-byte discriminator>] <fields in declaration order>
//! ```
//!
//! ## Modules Overview
//!
//! - [`codec`] - cursors, `Encode`/`Decode`, framing and tagged unions
//! - [`envelope`] - discriminators and the decoder registry
//! - [`filter`] - offset and record-size filters
//! - [`address`] - derived-address calculator
//! - [`config`] - layout constants and limits

// Allow the derive macro to work inside this crate's tests
extern crate self as ledgerwire;

/// Program-derived address calculator.
pub mod address;
/// Little-endian codec (cursors, traits, framing, unions).
pub mod codec;
/// Layout constants and decode limits.
pub mod config;
/// Discriminator envelope and decoder registry.
pub mod envelope;
/// Error type shared by every operation.
pub mod error;
/// Server-side query filters.
pub mod filter;
/// Fixed-width value types.
pub mod types;

pub use address::{
    create_program_address_with, create_with_seed, find_program_address_with, idl_address_with,
    CurvePredicate, DerivedAddress,
};
#[cfg(feature = "curve")]
pub use address::{create_program_address, find_program_address, idl_address, Ed25519Curve};
pub use codec::{Cursor, CursorMut, Decode, Encode, TaggedUnion};
pub use envelope::{instruction_data, DecoderRegistry, Discriminated, Discriminator};
pub use error::{Error, Result};
pub use filter::Filter;
pub use types::Identifier;

pub use ledgerwire_codegen::Layout; // Derive macro (for #[derive(ledgerwire::Layout)])
