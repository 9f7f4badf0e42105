// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! 8-byte record/instruction discriminators.
//!
//! Two derivation strategies are supported:
//!
//! - a fixed constant supplied by the caller ([`Discriminator::new`]), and
//! - `sha256("<namespace>:<name>")[..8]` ([`Discriminator::anchor`]), with
//!   `account`, `global` (instructions) and `event` namespaces.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::codec::{Cursor, CursorMut, Decode, Encode};
use crate::config::{ACCOUNT_NAMESPACE, DISCRIMINATOR_LEN, EVENT_NAMESPACE, INSTRUCTION_NAMESPACE};
use crate::error::{Error, Result};
use crate::filter::Filter;

/// Fixed 8-byte tag identifying a record or instruction type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Discriminator([u8; DISCRIMINATOR_LEN]);

impl Discriminator {
    pub const LEN: usize = DISCRIMINATOR_LEN;

    pub const fn new(bytes: [u8; DISCRIMINATOR_LEN]) -> Self {
        Self(bytes)
    }

    /// First 8 bytes of `sha256("<namespace>:<name>")`.
    pub fn anchor(namespace: &str, name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(namespace.as_bytes());
        hasher.update(b":");
        hasher.update(name.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; DISCRIMINATOR_LEN];
        bytes.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
        Self(bytes)
    }

    /// Discriminator of a stored account record type.
    pub fn for_account(type_name: &str) -> Self {
        Self::anchor(ACCOUNT_NAMESPACE, type_name)
    }

    /// Discriminator of an instruction, keyed by its snake_case method name.
    pub fn for_instruction(method_name: &str) -> Self {
        Self::anchor(INSTRUCTION_NAMESPACE, method_name)
    }

    /// Discriminator of an emitted event type.
    pub fn for_event(type_name: &str) -> Self {
        Self::anchor(EVENT_NAMESPACE, type_name)
    }

    pub const fn to_bytes(self) -> [u8; DISCRIMINATOR_LEN] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; DISCRIMINATOR_LEN] {
        &self.0
    }

    /// True if `data` starts with this discriminator.
    pub fn is_prefix_of(&self, data: &[u8]) -> bool {
        data.starts_with(&self.0)
    }

    /// Offset-0 filter selecting records of this type.
    pub fn filter(&self) -> Filter {
        Filter::Memcmp {
            offset: 0,
            bytes: Vec::from(self.0),
        }
    }
}

impl From<[u8; DISCRIMINATOR_LEN]> for Discriminator {
    fn from(bytes: [u8; DISCRIMINATOR_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discriminator({:?})", self.0)
    }
}

impl Encode for Discriminator {
    const FIXED_LEN: Option<usize> = Some(DISCRIMINATOR_LEN);

    fn encoded_len(&self) -> usize {
        DISCRIMINATOR_LEN
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        out.write_bytes(&self.0)
    }
}

impl Decode for Discriminator {
    const MIN_LEN: usize = DISCRIMINATOR_LEN;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        input.read_array::<DISCRIMINATOR_LEN>().map(Self)
    }
}

/// Read the 8-byte prefix at `offset` without interpreting it.
pub fn read_discriminator(src: &[u8], offset: usize) -> Result<Discriminator> {
    Discriminator::decode(&mut Cursor::at(src, offset))
}

/// Consume the 8-byte prefix and fail unless it equals `expected`.
///
/// On mismatch the cursor is left at the prefix so no field is read under
/// the wrong schema.
pub fn expect_discriminator(input: &mut Cursor<'_>, expected: &Discriminator) -> Result<()> {
    let found = input.peek_bytes(DISCRIMINATOR_LEN)?;
    if found != expected.as_bytes() {
        let mut bytes = [0u8; DISCRIMINATOR_LEN];
        bytes.copy_from_slice(found);
        log::debug!(
            "[envelope] discriminator mismatch at offset {}: expected {:?}, found {:?}",
            input.offset(),
            expected.as_bytes(),
            bytes
        );
        return Err(Error::DiscriminatorMismatch {
            expected: expected.to_bytes(),
            found: bytes,
        });
    }
    input.read_bytes(DISCRIMINATOR_LEN)?;
    Ok(())
}
