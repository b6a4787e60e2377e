// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamable::protocols::introducer::RespondPeersIntroducer;
use streamable::types::{ConditionWithArgs, SignagePoint};
use streamable::Streamable;

/// A successful top-level decode must re-encode to exactly the input.
fn canonical<T: Streamable>(data: &[u8]) {
    if let Ok(value) = T::from_bytes(data) {
        let bytes = value.to_bytes().expect("decoded values re-encode");
        assert_eq!(bytes, data, "non-canonical input accepted");
        let json = value.to_json();
        let back = T::from_json(&json).expect("JSON form converts back");
        assert_eq!(back.to_bytes().expect("re-encode"), data);
    }
}

fuzz_target!(|data: &[u8]| {
    canonical::<SignagePoint>(data);
    canonical::<ConditionWithArgs>(data);
    canonical::<RespondPeersIntroducer>(data);
});
