// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Integration tests for the dynamic codec.

use super::*;
use crate::error::{EncodeErrorKind, Mismatch, ParseErrorKind};
use crate::ser::Cursor;
use serde_json::json;
use std::sync::Arc;

/// One length byte followed by that many payload bytes; 0xff payload bytes
/// are refused.
fn short_blob_hint(input: &[u8]) -> Result<usize, ParseErrorKind> {
    match input.first() {
        Some(len) => Ok(1 + usize::from(*len)),
        None => Err(ParseErrorKind::UnexpectedEndOfInput {
            offset: 0,
            needed: 1,
            available: 0,
        }),
    }
}

fn short_blob_check(blob: &[u8]) -> Result<(), String> {
    if blob[1..].contains(&0xff) {
        return Err("0xff payload byte".into());
    }
    Ok(())
}

const SHORT_BLOB: CustomCodec = CustomCodec {
    name: "ShortBlob",
    min_size: 1,
    size_hint: short_blob_hint,
    check: short_blob_check,
    text: None,
};

fn sensor_schema() -> Arc<RecordSchema> {
    RecordSchemaBuilder::new("SensorReading")
        .uint_field("sensor_id", UIntWidth::W32)
        .uint_field("timestamp", UIntWidth::W64)
        .string_field("location")
        .field("calibration", TypeNode::optional(TypeNode::FixedBytes(4)))
        .field("samples", TypeNode::list(TypeNode::UInt(UIntWidth::W16)))
        .build()
        .expect("schema")
}

fn sensor_record(schema: &Arc<RecordSchema>) -> Record {
    Record::from_fields(
        schema,
        [
            ("sensor_id", Value::UInt(42)),
            ("timestamp", Value::UInt(1_702_900_000)),
            ("location", Value::from("Building A")),
            ("calibration", Value::some(Value::Bytes(vec![1, 2, 3, 4]))),
            ("samples", Value::List(vec![Value::UInt(7), Value::UInt(0xffff)])),
        ],
    )
    .expect("record")
}

#[test]
fn test_full_workflow() {
    // 1. Build schema at runtime
    let schema = sensor_schema();

    // 2. Create a validated record
    let record = sensor_record(&schema);
    assert_eq!(record.get("sensor_id"), Some(&Value::UInt(42)));

    // 3. Encode
    let encoded = encode(&record).expect("encode");
    let mut expected = vec![0, 0, 0, 42];
    expected.extend_from_slice(&1_702_900_000u64.to_be_bytes());
    expected.extend_from_slice(&[0, 0, 0, 10]);
    expected.extend_from_slice(b"Building A");
    expected.extend_from_slice(&[1, 1, 2, 3, 4]);
    expected.extend_from_slice(&[0, 0, 0, 2, 0, 7, 0xff, 0xff]);
    assert_eq!(encoded, expected);

    // 4. Decode
    let decoded = decode(&schema, &encoded).expect("decode");
    assert_eq!(decoded, record);

    // 5. JSON
    let json = to_json(&record);
    assert_eq!(
        json,
        json!({
            "sensor_id": 42,
            "timestamp": 1_702_900_000u64,
            "location": "Building A",
            "calibration": "01020304",
            "samples": [7, 65535],
        })
    );
    assert_eq!(from_json(&schema, &json).expect("from json"), record);
}

#[test]
fn test_complex_nested_types() {
    let vector = RecordSchemaBuilder::new("Vector3")
        .uint_field("x", UIntWidth::W8)
        .uint_field("y", UIntWidth::W8)
        .uint_field("z", UIntWidth::W8)
        .build()
        .expect("vector");
    let pose = RecordSchemaBuilder::new("Pose")
        .record_field("position", &vector)
        .field(
            "waypoints",
            TypeNode::list(TypeNode::Tuple(vec![TypeNode::Record(Arc::clone(&vector)), TypeNode::Bool])),
        )
        .build()
        .expect("pose");

    let v = |x: u8, y: u8, z: u8| {
        Value::Record(Record::new(&vector, vec![x.into(), y.into(), z.into()]).expect("vector value"))
    };
    let record = Record::new(
        &pose,
        vec![
            v(1, 2, 3),
            Value::List(vec![Value::Tuple(vec![v(4, 5, 6), Value::Bool(false)])]),
        ],
    )
    .expect("pose value");

    let bytes = encode(&record).expect("encode");
    assert_eq!(bytes, [1, 2, 3, 0, 0, 0, 1, 4, 5, 6, 0]);
    assert_eq!(decode(&pose, &bytes).expect("decode"), record);

    let json = to_json(&record);
    assert_eq!(json["waypoints"][0][0]["z"], json!(6));
    assert_eq!(from_json(&pose, &json).expect("from json"), record);
}

#[test]
fn test_decode_failures_carry_field_path() {
    let schema = sensor_schema();
    let mut bytes = encode(&sensor_record(&schema)).expect("encode");

    // calibration presence flag sits right after the 10-byte location
    let flag_at = 4 + 8 + 4 + 10;
    bytes[flag_at] = 0x02;
    let err = decode(&schema, &bytes).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::InvalidDiscriminant {
            offset: flag_at,
            value: 0x02,
        }
    );
    assert_eq!(err.trace.to_string(), "calibration");

    let good = encode(&sensor_record(&schema)).expect("encode");
    let err = decode(&schema, &good[..good.len() - 1]).unwrap_err();
    // Rejected by the count check before any element is read
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedEndOfInput {
            needed: 4,
            available: 3,
            ..
        }
    ));
    assert_eq!(err.trace.to_string(), "samples");

    // Count fits, the second element's declared length does not
    let node = TypeNode::list(TypeNode::Bytes);
    let err = decode_value(&node, &[0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 9, 1]).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedEndOfInput {
            offset: 12,
            needed: 9,
            available: 1,
        }
    ));
    assert_eq!(err.trace.to_string(), "1");
}

#[test]
fn test_trailing_bytes_only_at_top_level() {
    let node = TypeNode::UInt(UIntWidth::W16);
    let err = decode_value(&node, &[0, 1, 2]).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::TrailingBytes {
            consumed: 2,
            remaining: 1,
        }
    );

    // Two values back to back on one stream
    let mut cursor = Cursor::new(&[0, 1, 0, 0, 0, 1, 0xaa]);
    assert_eq!(decode_from(&mut cursor, &node).expect("first"), Value::UInt(1));
    assert_eq!(
        decode_from(&mut cursor, &TypeNode::Bytes).expect("second"),
        Value::Bytes(vec![0xaa])
    );
    assert!(cursor.is_eof());
}

#[test]
fn test_list_count_larger_than_input() {
    let node = TypeNode::list(TypeNode::UInt(UIntWidth::W64));
    let err = decode_value(&node, &[0xff, 0xff, 0xff, 0xff, 0, 0]).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedEndOfInput {
            offset: 4,
            needed: 0xffff_ffff * 8,
            available: 2,
        }
    );
}

#[test]
fn test_empty_record_law() {
    let schema = RecordSchemaBuilder::new("Nothing").build().expect("schema");
    let record = Record::new(&schema, Vec::new()).expect("record");
    assert_eq!(encode(&record).expect("encode"), Vec::<u8>::new());
    assert_eq!(decode(&schema, &[]).expect("decode"), record);
    assert_eq!(to_json(&record), json!({}));
    assert!(matches!(
        decode(&schema, &[0]).unwrap_err().kind,
        ParseErrorKind::TrailingBytes { .. }
    ));
}

#[test]
fn test_list_of_empty_records_is_refused() {
    let schema = RecordSchemaBuilder::new("Hollow").build().expect("schema");
    let node = TypeNode::list(TypeNode::Record(Arc::clone(&schema)));

    let err = decode_value(&node, &[0xff, 0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Schema(_)));
    let err = decode_value(&node, &[0x01, 0, 0, 0]).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Schema(_)));

    let hollow = Record::new(&schema, Vec::new()).expect("record");
    let mut out = Vec::new();
    let err = encode_value(&Value::List(vec![Value::Record(hollow)]), &node, &mut out).unwrap_err();
    assert!(matches!(err.kind, EncodeErrorKind::Schema(_)));
    assert!(out.is_empty());
}

#[test]
fn test_custom_codec_bounds_its_read() {
    let node = TypeNode::Tuple(vec![TypeNode::Custom(SHORT_BLOB), TypeNode::Bool]);
    let value = decode_value(&node, &[2, 0xaa, 0xbb, 1]).expect("decode");
    assert_eq!(
        value,
        Value::Tuple(vec![Value::Bytes(vec![2, 0xaa, 0xbb]), Value::Bool(true)])
    );

    let mut out = Vec::new();
    encode_value(&value, &node, &mut out).expect("encode");
    assert_eq!(out, [2, 0xaa, 0xbb, 1]);

    let err = decode_value(&node, &[3, 0xaa]).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEndOfInput { .. }));
    assert_eq!(err.trace.to_string(), "0");

    let err = decode_value(&node, &[1, 0xff, 0]).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::Custom {
            codec: "ShortBlob",
            ..
        }
    ));

    // The blob length disagrees with what the codec reads from it
    let err = encode_value(&Value::Bytes(vec![5, 0]), &TypeNode::Custom(SHORT_BLOB), &mut Vec::new())
        .unwrap_err();
    assert_eq!(
        err.kind,
        EncodeErrorKind::SizeMismatch {
            codec: "ShortBlob",
            expected: 6,
            actual: 2,
        }
    );
}

#[test]
fn test_encode_value_rejects_mismatch() {
    let node = TypeNode::list(TypeNode::UInt(UIntWidth::W8));
    let err = encode_value(
        &Value::List(vec![Value::UInt(1), Value::UInt(300)]),
        &node,
        &mut Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err.kind,
        EncodeErrorKind::ValueMismatch(Mismatch::OutOfRange { bits: 8, .. })
    ));
    assert_eq!(err.trace.to_string(), "1");

    let err = encode_value(&Value::Str("x".into()), &TypeNode::Bytes, &mut Vec::new()).unwrap_err();
    assert!(matches!(err.kind, EncodeErrorKind::ValueMismatch(Mismatch::WrongType { .. })));
}

#[test]
fn test_from_json_errors() {
    let schema = sensor_schema();
    let mut json = to_json(&sensor_record(&schema));

    json["samples"][1] = json!(65536);
    let err = from_json(&schema, &json).unwrap_err();
    assert!(matches!(err.mismatch, Mismatch::OutOfRange { bits: 16, .. }));
    assert_eq!(err.trace.to_string(), "samples.1");

    json["samples"] = json!([]);
    json["calibration"] = json!("0102");
    let err = from_json(&schema, &json).unwrap_err();
    assert_eq!(
        err.mismatch,
        Mismatch::WrongLength {
            expected: 4,
            actual: 2,
        }
    );
    assert_eq!(err.trace.to_string(), "calibration");

    json["calibration"] = json!(null);
    json["extra"] = json!(1);
    let err = from_json(&schema, &json).unwrap_err();
    assert_eq!(err.mismatch, Mismatch::UnknownField("extra".into()));

    let err = from_json(&schema, &json!([1, 2])).unwrap_err();
    assert!(matches!(err.mismatch, Mismatch::WrongType { found: "array", .. }));
}

#[test]
fn test_tuple_json_arity() {
    let node = TypeNode::Tuple(vec![TypeNode::Bool, TypeNode::Str]);
    assert_eq!(
        value_from_json(&node, &json!([true, "x"])).expect("tuple"),
        Value::Tuple(vec![Value::Bool(true), Value::from("x")])
    );
    let err = value_from_json(&node, &json!([true])).unwrap_err();
    assert_eq!(
        err.mismatch,
        Mismatch::WrongArity {
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn test_nested_optional_json_collapses() {
    let node = TypeNode::optional(TypeNode::optional(TypeNode::Bool));
    let inner_none = Value::some(Value::none());

    // Distinct on the wire
    let mut out = Vec::new();
    encode_value(&inner_none, &node, &mut out).expect("encode");
    assert_eq!(out, [1, 0]);
    assert_eq!(decode_value(&node, &out).expect("decode"), inner_none);

    // Indistinguishable in JSON
    assert_eq!(value_to_json(&inner_none, &node).expect("json"), json!(null));
    assert_eq!(value_from_json(&node, &json!(null)).expect("value"), Value::none());
}

#[test]
fn test_value_to_json_checks_conformance() {
    let err = value_to_json(&Value::Bool(true), &TypeNode::Str).unwrap_err();
    assert!(matches!(err.mismatch, Mismatch::WrongType { found: "bool", .. }));
}
