// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Error type shared by the codec, filter builder and address calculator.
//!
//! Every failure is local to one encode/decode/derive call and is returned to
//! the immediate caller. Nothing is retried internally and no partially
//! decoded value is ever handed back.

use std::fmt;

/// Result type for ledgerwire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ledgerwire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Buffer Errors
    // ========================================================================
    /// A read or write would access bytes past the end of the buffer.
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A collection length is outside the representable or allowed range.
    LengthOverflow {
        context: &'static str,
        len: usize,
        limit: usize,
    },

    // ========================================================================
    // Decode Errors
    // ========================================================================
    /// Tagged-union ordinal not present in the closed variant table.
    UnknownOrdinal { type_name: &'static str, ordinal: u8 },
    /// Leading 8 bytes do not match the record's expected discriminator.
    DiscriminatorMismatch { expected: [u8; 8], found: [u8; 8] },
    /// No decoder is registered for the leading discriminator.
    UnknownDiscriminator([u8; 8]),
    /// A second decoder was registered for an existing discriminator.
    DuplicateDiscriminator([u8; 8]),
    /// Boolean byte other than 0 or 1.
    InvalidBool { offset: usize, value: u8 },
    /// String payload is not valid UTF-8.
    InvalidUtf8 { offset: usize },
    /// Text is not the base58 form of exactly 32 bytes.
    InvalidIdentifier,

    // ========================================================================
    // Filter Errors
    // ========================================================================
    /// Offset filter built with an empty byte pattern.
    EmptyFilterPattern,

    // ========================================================================
    // Address Derivation Errors
    // ========================================================================
    /// A seed exceeds the maximum seed length.
    SeedTooLong { index: usize, len: usize },
    /// More seeds than the runtime accepts.
    TooManySeeds { count: usize },
    /// Explicit-bump derivation produced a point on the curve.
    InvalidSeeds,
    /// `create_with_seed` owner ends with the derived-address marker.
    IllegalOwner,
    /// No bump in 255..=0 produced an off-curve address.
    DerivationExhausted,
}

fn hex8(bytes: &[u8; 8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedBuffer {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated buffer at offset {}: need {} bytes, {} available",
                offset, needed, available
            ),
            Error::LengthOverflow {
                context,
                len,
                limit,
            } => write!(f, "{} length {} exceeds limit {}", context, len, limit),
            Error::UnknownOrdinal { type_name, ordinal } => {
                write!(f, "unknown ordinal {} for enum {}", ordinal, type_name)
            }
            Error::DiscriminatorMismatch { expected, found } => write!(
                f,
                "discriminator mismatch: expected {}, found {}",
                hex8(expected),
                hex8(found)
            ),
            Error::UnknownDiscriminator(found) => {
                write!(f, "no decoder registered for discriminator {}", hex8(found))
            }
            Error::DuplicateDiscriminator(found) => {
                write!(f, "discriminator {} already registered", hex8(found))
            }
            Error::InvalidBool { offset, value } => {
                write!(f, "invalid bool byte {:#04x} at offset {}", value, offset)
            }
            Error::InvalidUtf8 { offset } => write!(f, "invalid UTF-8 string at offset {}", offset),
            Error::InvalidIdentifier => write!(f, "identifier is not 32 bytes of base58"),
            Error::EmptyFilterPattern => write!(f, "offset filter requires a non-empty pattern"),
            Error::SeedTooLong { index, len } => {
                write!(f, "seed {} is {} bytes, exceeds maximum seed length", index, len)
            }
            Error::TooManySeeds { count } => write!(f, "{} seeds exceeds maximum seed count", count),
            Error::InvalidSeeds => write!(f, "seeds derive an address on the curve"),
            Error::IllegalOwner => write!(f, "owner must not be a derived-address marker"),
            Error::DerivationExhausted => write!(f, "no valid bump found for derived address"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// True when the failure was caused by a short buffer.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Error::TruncatedBuffer { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variants() {
        let err = Error::TruncatedBuffer {
            offset: 12,
            needed: 8,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "truncated buffer at offset 12: need 8 bytes, 3 available"
        );

        let err = Error::UnknownOrdinal {
            type_name: "Currency",
            ordinal: 7,
        };
        assert_eq!(err.to_string(), "unknown ordinal 7 for enum Currency");

        let err = Error::DiscriminatorMismatch {
            expected: [23, 183, 248, 55, 96, 216, 172, 96],
            found: [0; 8],
        };
        assert_eq!(
            err.to_string(),
            "discriminator mismatch: expected 17b7f83760d8ac60, found 0000000000000000"
        );

        let err = Error::InvalidBool {
            offset: 4,
            value: 2,
        };
        assert_eq!(err.to_string(), "invalid bool byte 0x02 at offset 4");
    }

    #[test]
    fn test_is_truncation() {
        assert!(Error::TruncatedBuffer {
            offset: 0,
            needed: 1,
            available: 0
        }
        .is_truncation());
        assert!(!Error::DerivationExhausted.is_truncation());
    }
}
