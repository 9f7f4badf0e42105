// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! On-curve predicate used to reject derived-address candidates.

/// Decides whether 32 bytes decode to a point on the signing curve.
///
/// A derived address must NOT be a valid curve point, otherwise some
/// private key could sign for it.
pub trait CurvePredicate {
    fn is_on_curve(&self, candidate: &[u8; 32]) -> bool;
}

impl<F> CurvePredicate for F
where
    F: Fn(&[u8; 32]) -> bool,
{
    fn is_on_curve(&self, candidate: &[u8; 32]) -> bool {
        self(candidate)
    }
}

/// Ed25519 point-decompression check.
#[cfg(feature = "curve")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Curve;

#[cfg(feature = "curve")]
impl CurvePredicate for Ed25519Curve {
    fn is_on_curve(&self, candidate: &[u8; 32]) -> bool {
        ed25519_dalek::VerifyingKey::from_bytes(candidate).is_ok()
    }
}
