// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Wire constants and limits - single source of truth.
//!
//! Every width, prefix size and derivation limit used by the codec lives
//! here. Generated record code and the runtime helpers both read these
//! values; nothing else hardcodes them.

// =======================================================================
// Framing widths
// =======================================================================

/// Width of a record/instruction discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Width of an opaque identifier (account address, program id).
pub const IDENTIFIER_LEN: usize = 32;

/// Width of the vector/string element-count prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Width of the presence flag in front of an optional value.
pub const OPTION_FLAG_LEN: usize = 1;

/// Width of a tagged-union ordinal.
pub const ORDINAL_LEN: usize = 1;

// =======================================================================
// Collection limits
// =======================================================================

/// Largest element count a length prefix may carry on write.
///
/// The prefix is 4 bytes and consumers read it as a signed 32-bit value,
/// so anything above `i32::MAX` is rejected rather than truncated.
pub const MAX_LENGTH_PREFIX: usize = i32::MAX as usize;

/// Largest element count accepted on decode before any allocation.
///
/// Matches the runtime's maximum account data size (10 MiB); no
/// well-formed record can hold more elements than it has bytes.
pub const MAX_SEQUENCE_LENGTH: usize = 10 * 1024 * 1024;

// =======================================================================
// Address derivation
// =======================================================================

/// Maximum length of a single derivation seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, bump seed included.
pub const MAX_SEEDS: usize = 16;

/// Suffix appended to every derived-address hash preimage.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Seed used to locate a program's on-chain interface description account.
pub const IDL_SEED: &str = "anchor:idl";

// =======================================================================
// Discriminator namespaces
// =======================================================================

/// Namespace for stored account records.
pub const ACCOUNT_NAMESPACE: &str = "account";

/// Namespace for instruction-call payloads.
pub const INSTRUCTION_NAMESPACE: &str = "global";

/// Namespace for emitted event payloads.
pub const EVENT_NAMESPACE: &str = "event";
