// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamable::dynamic;
use streamable::types::SignagePoint;
use streamable::{Streamable, TypeNode};

// The dynamic engine accepts exactly the inputs the typed decoder accepts.
fuzz_target!(|data: &[u8]| {
    let Ok(TypeNode::Record(schema)) = SignagePoint::type_node() else {
        return;
    };
    let typed = SignagePoint::from_bytes(data);
    let dynamic = dynamic::decode(&schema, data);
    assert_eq!(typed.is_ok(), dynamic.is_ok());
    if let Ok(record) = dynamic {
        assert_eq!(dynamic::encode(&record).expect("re-encode"), data);
    }
});
