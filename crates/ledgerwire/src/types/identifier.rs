// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! 32-byte opaque identifier (account address, program id).
//!
//! Text form is base58, as used by the runtime and its explorers.

use std::fmt;
use std::str::FromStr;

use crate::codec::{Cursor, CursorMut, Decode, Encode};
use crate::config::IDENTIFIER_LEN;
use crate::error::{Error, Result};

/// Opaque 32-byte identifier.
///
/// Identity is byte equality; the codec never interprets the contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identifier([u8; IDENTIFIER_LEN]);

impl Identifier {
    pub const LEN: usize = IDENTIFIER_LEN;

    pub const fn new(bytes: [u8; IDENTIFIER_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice that must be exactly 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; IDENTIFIER_LEN] =
            bytes.try_into().map_err(|_| Error::TruncatedBuffer {
                offset: 0,
                needed: IDENTIFIER_LEN,
                available: bytes.len(),
            })?;
        Ok(Self(array))
    }

    pub const fn to_bytes(self) -> [u8; IDENTIFIER_LEN] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; IDENTIFIER_LEN] {
        &self.0
    }
}

impl From<[u8; IDENTIFIER_LEN]> for Identifier {
    fn from(bytes: [u8; IDENTIFIER_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|_| Error::InvalidIdentifier)?;
        let array: [u8; IDENTIFIER_LEN] =
            bytes.try_into().map_err(|_| Error::InvalidIdentifier)?;
        Ok(Self(array))
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl Encode for Identifier {
    const FIXED_LEN: Option<usize> = Some(IDENTIFIER_LEN);

    fn encoded_len(&self) -> usize {
        IDENTIFIER_LEN
    }

    fn encode(&self, out: &mut CursorMut<'_>) -> Result<()> {
        out.write_bytes(&self.0)
    }
}

impl Decode for Identifier {
    const MIN_LEN: usize = IDENTIFIER_LEN;

    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        input.read_array::<IDENTIFIER_LEN>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_text_is_base58() {
        assert_eq!(
            Identifier::default().to_string(),
            "11111111111111111111111111111111"
        );
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        assert_eq!(
            Identifier::new(bytes).to_string(),
            "11111111111111111111111111111112"
        );

        let program: Identifier = "LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo"
            .parse()
            .expect("valid address");
        assert_eq!(&program.as_bytes()[..4], &[4, 233, 225, 47]);
        assert_eq!(
            program.to_string(),
            "LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo"
        );
        assert_eq!(
            format!("{program:?}"),
            "Identifier(LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo)"
        );
    }

    #[test]
    fn test_identifier_parse_rejects_bad_text() {
        // `0` is outside the base58 alphabet.
        assert_eq!("0OIl".parse::<Identifier>(), Err(Error::InvalidIdentifier));
        assert_eq!("1111".parse::<Identifier>(), Err(Error::InvalidIdentifier));
        assert_eq!(
            "1111111111111111111111111111111111".parse::<Identifier>(),
            Err(Error::InvalidIdentifier)
        );
    }

    #[test]
    fn test_try_from_slice_requires_exact_length() {
        assert!(Identifier::try_from_slice(&[1u8; 31]).is_err());
        assert!(Identifier::try_from_slice(&[1u8; 33]).is_err());
        let id = Identifier::try_from_slice(&[1u8; 32]).expect("32 bytes");
        assert_eq!(id.to_bytes(), [1u8; 32]);
    }
}
