// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

#![no_main]

use libfuzzer_sys::fuzz_target;
use ledgerwire::{find_program_address, create_program_address, Identifier};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (program, rest) = data.split_at(32);
    let Ok(program_id) = Identifier::try_from_slice(program) else {
        return;
    };
    let seeds: Vec<&[u8]> = rest.chunks(24).collect();

    // A found (address, bump) pair must be reproducible with the explicit bump.
    if let Ok(derived) = find_program_address(&seeds, &program_id) {
        let bump = [derived.bump];
        let mut with_bump = seeds.clone();
        with_bump.push(&bump);
        assert_eq!(create_program_address(&with_bump, &program_id), Ok(derived.address));
    }
});
