// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in records: the typed and dynamic tiers agree byte for byte and on
//! JSON once the registry is populated.

use serde_json::json;
use streamable::dynamic::{self, resolve, GlobalScope, Record, Value};
use streamable::error::{ParseErrorKind, SchemaErrorKind};
use streamable::protocols::introducer::{RequestPeersIntroducer, RespondPeersIntroducer};
use streamable::protocols::simulator::ReorgProtocol;
use streamable::types::{
    ClassgroupElement, Coin, ConditionOpcode, ConditionWithArgs, SerializedProgram, SignagePoint,
    TimestampedPeerInfo, VDFInfo, VDFProof,
};
use streamable::{registry, Bytes, Bytes100, Bytes32, Streamable};

/// Decode `value`'s bytes with the schema looked up by name, re-encode and
/// compare JSON in both directions.
fn assert_tiers_agree<T: Streamable + PartialEq + std::fmt::Debug>(name: &str, value: &T) {
    registry::builtin().expect("builtin");
    let schema = registry::lookup(name).unwrap_or_else(|| panic!("{name} is registered"));

    let bytes = value.to_bytes().expect("typed encode");
    let record = dynamic::decode(&schema, &bytes).expect("dynamic decode");
    assert_eq!(dynamic::encode(&record).expect("dynamic encode"), bytes);

    let typed_json = value.to_json();
    assert_eq!(dynamic::to_json(&record), typed_json);
    assert_eq!(dynamic::from_json(&schema, &typed_json).expect("dynamic json"), record);
    assert_eq!(&T::from_json(&typed_json).expect("typed json"), value);
}

fn vdf_info(seed: u8) -> VDFInfo {
    VDFInfo {
        challenge: Bytes32::new([seed; 32]),
        number_of_iterations: u64::from(seed) << 40,
        output: ClassgroupElement {
            data: Bytes100::new([seed.wrapping_add(1); 100]),
        },
    }
}

#[test]
fn coin_tiers_agree() {
    assert_tiers_agree(
        "Coin",
        &Coin {
            parent_coin_info: Bytes32::new([1; 32]),
            puzzle_hash: Bytes32::new([2; 32]),
            amount: u64::MAX,
        },
    );
}

#[test]
fn signage_point_tiers_agree() {
    let point = SignagePoint {
        cc_vdf: Some(vdf_info(4)),
        cc_proof: Some(VDFProof {
            witness_type: 2,
            witness: Bytes::from(vec![0xc0, 0xff, 0xee]),
            normalized_to_identity: false,
        }),
        rc_vdf: Some(vdf_info(8)),
        rc_proof: None,
    };
    assert_tiers_agree("SignagePoint", &point);
}

#[test]
fn condition_tiers_agree() {
    let condition = ConditionWithArgs {
        opcode: ConditionOpcode::ASSERT_MY_AMOUNT,
        vars: vec![Bytes::from(vec![0x05])],
    };
    assert_tiers_agree("ConditionWithArgs", &condition);
    assert_eq!(condition.to_json()["opcode"], json!("ASSERT_MY_AMOUNT"));
}

#[test]
fn protocol_tiers_agree() {
    assert_tiers_agree("RequestPeersIntroducer", &RequestPeersIntroducer {});
    assert_tiers_agree(
        "RespondPeersIntroducer",
        &RespondPeersIntroducer {
            peer_list: vec![
                TimestampedPeerInfo {
                    host: "127.0.0.1".into(),
                    port: 8444,
                    timestamp: 1_700_000_000,
                },
                TimestampedPeerInfo {
                    host: "::1".into(),
                    port: 58444,
                    timestamp: 0,
                },
            ],
        },
    );
    assert_tiers_agree(
        "ReorgProtocol",
        &ReorgProtocol {
            old_index: 10,
            new_index: 12,
            puzzle_hash: Bytes32::default(),
        },
    );
}

#[test]
fn dynamic_construction_checks_custom_leaves() {
    registry::builtin().expect("builtin");
    let schema = registry::lookup("ConditionWithArgs").expect("registered");

    let ok = Record::from_fields(
        &schema,
        [
            ("vars", Value::List(Vec::new())),
            ("opcode", Value::Bytes(vec![ConditionOpcode::CREATE_COIN.code()])),
        ],
    )
    .expect("known opcode");
    assert_eq!(dynamic::encode(&ok).expect("encode"), [51, 0, 0, 0, 0]);

    let err = Record::from_fields(
        &schema,
        [("opcode", Value::Bytes(vec![0])), ("vars", Value::List(Vec::new()))],
    )
    .unwrap_err();
    assert_eq!(err.trace.to_string(), "opcode");
}

#[test]
fn resolver_sees_builtin_names() {
    registry::builtin().expect("builtin");
    let node = resolve("Vec<(Coin, Option<SerializedProgram>)>", &GlobalScope).expect("resolve");
    assert_eq!(node.to_string(), "Vec<(Coin, Option<SerializedProgram>)>");
    assert_eq!(
        node,
        <Vec<(Coin, Option<SerializedProgram>)> as Streamable>::type_node().expect("typed")
    );
}

#[test]
fn list_of_zero_field_messages_has_no_codec() {
    registry::builtin().expect("builtin");
    let err = resolve("Vec<RequestPeersIntroducer>", &GlobalScope).unwrap_err();
    assert!(matches!(err.kind, SchemaErrorKind::UnsupportedType { .. }));

    let err = Vec::<RequestPeersIntroducer>::from_bytes(&[0xff, 0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Schema(_)));

    // A presence flag per element is enough.
    let node = resolve("Vec<Option<RequestPeersIntroducer>>", &GlobalScope).expect("resolve");
    let err = dynamic::decode_value(&node, &[0xff, 0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEndOfInput { .. }));
}

#[test]
fn program_inside_a_record_is_self_delimiting() {
    let pair = (SerializedProgram::new(vec![0xff, 0x01, 0x80]).expect("program"), 7u8);
    let bytes = pair.to_bytes().expect("encode");
    assert_eq!(bytes, [0xff, 0x01, 0x80, 7]);
    assert_eq!(<(SerializedProgram, u8)>::from_bytes(&bytes).expect("decode"), pair);

    let err = <(SerializedProgram, u8)>::from_bytes(&[0xff, 0x01]).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEndOfInput { offset: 2, .. }));
    assert_eq!(err.trace.to_string(), "0");
}
