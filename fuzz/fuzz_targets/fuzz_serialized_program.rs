// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamable::types::serialized_length;

fuzz_target!(|data: &[u8]| {
    if let Ok(len) = serialized_length(data) {
        assert!(len <= data.len());
        // A program is self-delimiting: its own bytes measure the same.
        assert_eq!(serialized_length(&data[..len]), Ok(len));
    }
});
