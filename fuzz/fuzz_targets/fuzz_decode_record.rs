// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

#![no_main]

use libfuzzer_sys::fuzz_target;
use ledgerwire::{Decode, Encode, Identifier, Layout};

#[derive(Layout, Debug, PartialEq)]
enum Payout {
    Deferred,
    Fixed(u64),
    Split { shares: Vec<u16>, memo: Option<String> },
}

#[derive(Layout, Debug, PartialEq)]
#[layout(account)]
struct Vault {
    authority: Identifier,
    balance: i128,
    locked: bool,
    payout: Payout,
    history: Vec<Vec<i64>>,
}

fuzz_target!(|data: &[u8]| {
    // Any successful decode must re-encode to exactly the consumed bytes.
    if let Ok((vault, used)) = Vault::read_at(data, 0) {
        let bytes = vault.to_vec().expect("re-encode decoded record");
        assert_eq!(bytes, &data[..used]);
    }

    let _ = Vec::<String>::from_slice(data);
    let _ = Option::<[u8; 32]>::from_slice(data);
});
