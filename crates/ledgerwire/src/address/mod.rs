// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Program-derived address calculator.
//!
//! ```text
//! candidate = sha256(seed_0 || .. || seed_n || [bump] || program_id || "ProgramDerivedAddress")
//! ```
//!
//! `find_program_address` tries bumps 255 down to 0 and returns the first
//! candidate that is not a point on the curve. The curve check is injected
//! as a [`CurvePredicate`]; with the `curve` feature the ed25519 check is
//! provided by [`Ed25519Curve`].

mod curve;

#[cfg(feature = "curve")]
pub use curve::Ed25519Curve;
pub use curve::CurvePredicate;

use sha2::{Digest, Sha256};

use crate::config::{IDL_SEED, MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER};
use crate::error::{Error, Result};
use crate::types::Identifier;

/// Off-curve address together with the bump that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Identifier,
    pub bump: u8,
}

fn check_seeds(seeds: &[&[u8]], reserved: usize) -> Result<()> {
    let count = seeds.len() + reserved;
    if count > MAX_SEEDS {
        return Err(Error::TooManySeeds { count });
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(Error::SeedTooLong {
                index,
                len: seed.len(),
            });
        }
    }
    Ok(())
}

fn hash_candidate(seeds: &[&[u8]], bump: Option<u8>, program_id: &Identifier) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    if let Some(bump) = bump {
        hasher.update([bump]);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

/// Hash `seeds` as-is (the caller supplies any bump) and fail with
/// `InvalidSeeds` if the result lies on the curve.
pub fn create_program_address_with<P: CurvePredicate + ?Sized>(
    seeds: &[&[u8]],
    program_id: &Identifier,
    curve: &P,
) -> Result<Identifier> {
    check_seeds(seeds, 0)?;
    let candidate = hash_candidate(seeds, None, program_id);
    if curve.is_on_curve(&candidate) {
        return Err(Error::InvalidSeeds);
    }
    Ok(Identifier::new(candidate))
}

/// Search bumps 255..=0 for the first off-curve candidate.
///
/// Seeds are validated before any hashing; the bump counts toward the seed
/// limit.
pub fn find_program_address_with<P: CurvePredicate + ?Sized>(
    seeds: &[&[u8]],
    program_id: &Identifier,
    curve: &P,
) -> Result<DerivedAddress> {
    check_seeds(seeds, 1)?;
    for bump in (0..=u8::MAX).rev() {
        let candidate = hash_candidate(seeds, Some(bump), program_id);
        if curve.is_on_curve(&candidate) {
            log::trace!("[address] bump {} lies on curve, trying next", bump);
            continue;
        }
        return Ok(DerivedAddress {
            address: Identifier::new(candidate),
            bump,
        });
    }
    log::debug!(
        "[address] no off-curve bump for {} seeds under {}",
        seeds.len(),
        program_id
    );
    Err(Error::DerivationExhausted)
}

/// [`create_program_address_with`] using the ed25519 curve check.
#[cfg(feature = "curve")]
pub fn create_program_address(seeds: &[&[u8]], program_id: &Identifier) -> Result<Identifier> {
    create_program_address_with(seeds, program_id, &Ed25519Curve)
}

/// [`find_program_address_with`] using the ed25519 curve check.
#[cfg(feature = "curve")]
pub fn find_program_address(seeds: &[&[u8]], program_id: &Identifier) -> Result<DerivedAddress> {
    find_program_address_with(seeds, program_id, &Ed25519Curve)
}

/// `sha256(base || seed || owner)`; no curve check, no bump.
///
/// `seed` is limited to the maximum seed length and `owner` must not end
/// with the derived-address marker.
pub fn create_with_seed(base: &Identifier, seed: &str, owner: &Identifier) -> Result<Identifier> {
    if seed.len() > MAX_SEED_LEN {
        return Err(Error::SeedTooLong {
            index: 0,
            len: seed.len(),
        });
    }
    if owner.as_bytes().ends_with(PDA_MARKER) {
        return Err(Error::IllegalOwner);
    }
    let mut hasher = Sha256::new();
    hasher.update(base.as_bytes());
    hasher.update(seed.as_bytes());
    hasher.update(owner.as_bytes());
    Ok(Identifier::new(hasher.finalize().into()))
}

/// Address of the on-chain IDL record for `program_id`.
pub fn idl_address_with<P: CurvePredicate + ?Sized>(
    program_id: &Identifier,
    curve: &P,
) -> Result<Identifier> {
    let base = find_program_address_with(&[], program_id, curve)?;
    create_with_seed(&base.address, IDL_SEED, program_id)
}

#[cfg(feature = "curve")]
pub fn idl_address(program_id: &Identifier) -> Result<Identifier> {
    idl_address_with(program_id, &Ed25519Curve)
}
