// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Discriminator-routed decoder registry.
//!
//! Built once from a static list of `(discriminator, decoder)` pairs and
//! passed explicitly to decode calls. There is no process-global table.

use std::collections::HashMap;

use super::discriminator::{read_discriminator, Discriminator};
use super::Discriminated;
use crate::codec::Decode;
use crate::error::{Error, Result};

/// Decoder for one record type. Receives the full record, discriminator
/// included.
pub type RecordDecoder<T> = fn(&[u8]) -> Result<T>;

/// Maps discriminators to the decoder for the record type they tag.
pub struct DecoderRegistry<T> {
    decoders: HashMap<Discriminator, RecordDecoder<T>>,
}

impl<T> Default for DecoderRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DecoderRegistry<T> {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Build from a static list; a repeated discriminator is an error.
    pub fn from_entries(entries: &[(Discriminator, RecordDecoder<T>)]) -> Result<Self> {
        let mut registry = Self::new();
        for (discriminator, decoder) in entries {
            registry.register(*discriminator, *decoder)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, discriminator: Discriminator, decoder: RecordDecoder<T>) -> Result<()> {
        if self.decoders.contains_key(&discriminator) {
            return Err(Error::DuplicateDiscriminator(discriminator.to_bytes()));
        }
        self.decoders.insert(discriminator, decoder);
        Ok(())
    }

    /// Register a record type using its own discriminator and decoder.
    pub fn register_record<R>(&mut self) -> Result<()>
    where
        R: Discriminated + Decode + Into<T>,
    {
        self.register(R::DISCRIMINATOR, decode_into::<R, T>)
    }

    /// Decode `data` with the decoder registered for its leading 8 bytes.
    pub fn decode(&self, data: &[u8]) -> Result<T> {
        let discriminator = read_discriminator(data, 0)?;
        match self.decoders.get(&discriminator) {
            Some(decoder) => decoder(data),
            None => {
                log::debug!("[registry] no decoder for {:?}", discriminator);
                Err(Error::UnknownDiscriminator(discriminator.to_bytes()))
            }
        }
    }

    pub fn contains(&self, discriminator: &Discriminator) -> bool {
        self.decoders.contains_key(discriminator)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

fn decode_into<R, T>(data: &[u8]) -> Result<T>
where
    R: Decode + Into<T>,
{
    R::from_slice(data).map(Into::into)
}
