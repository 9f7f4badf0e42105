// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

//! Value types with a fixed on-wire width.

mod identifier;

pub use identifier::Identifier;
