// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven binary encoder.

use crate::dynamic::{check_list_element, Record, TypeNode, Value};
use crate::error::{EncodeError, EncodeErrorKind, Mismatch};
use crate::ser::{put_custom, put_flag, put_length, put_prefixed, put_uint};

/// Encode a record in canonical form.
pub fn encode(record: &Record) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(record.schema().min_size());
    encode_record(record, &mut out)?;
    Ok(out)
}

fn encode_record(record: &Record, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    for (field, value) in record.schema().fields().iter().zip(record.values()) {
        encode_value(value, field.node(), out).map_err(|e| e.within(field.name()))?;
    }
    Ok(())
}

fn mismatch(node: &TypeNode, value: &Value) -> EncodeError {
    EncodeErrorKind::ValueMismatch(Mismatch::WrongType {
        expected: node.to_string(),
        found: value.kind_name(),
    })
    .into()
}

/// Append the encoding of `value` under `node`.
///
/// The value is checked as it is written; a mismatch fails with
/// `ValueMismatch` and leaves `out` partially written.
pub fn encode_value(value: &Value, node: &TypeNode, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match (node, value) {
        (TypeNode::UInt(width), Value::UInt(v)) => {
            if *v > width.max_value() {
                return Err(EncodeErrorKind::ValueMismatch(Mismatch::OutOfRange {
                    bits: width.bits(),
                    value: v.to_string(),
                })
                .into());
            }
            put_uint(out, *v, *width);
        }
        (TypeNode::Bool, Value::Bool(b)) => put_flag(out, *b),
        (TypeNode::Bytes, Value::Bytes(bytes)) => put_prefixed(out, bytes)?,
        (TypeNode::Str, Value::Str(s)) => put_prefixed(out, s.as_bytes())?,
        (TypeNode::FixedBytes(n), Value::Bytes(bytes)) => {
            if bytes.len() != *n {
                return Err(EncodeErrorKind::ValueMismatch(Mismatch::WrongLength {
                    expected: *n,
                    actual: bytes.len(),
                })
                .into());
            }
            out.extend_from_slice(bytes);
        }
        (TypeNode::Custom(codec), Value::Bytes(blob)) => put_custom(out, codec, blob)?,
        (TypeNode::Optional(inner), Value::Optional(opt)) => match opt {
            None => put_flag(out, false),
            Some(value) => {
                put_flag(out, true);
                encode_value(value, inner, out)?;
            }
        },
        (TypeNode::List(element), Value::List(items)) => {
            check_list_element(element)?;
            put_length(out, items.len())?;
            for (i, item) in items.iter().enumerate() {
                encode_value(item, element, out).map_err(|e| e.within(i))?;
            }
        }
        (TypeNode::Tuple(nodes), Value::Tuple(items)) => {
            if nodes.len() != items.len() {
                return Err(EncodeErrorKind::ValueMismatch(Mismatch::WrongArity {
                    expected: nodes.len(),
                    actual: items.len(),
                })
                .into());
            }
            for (i, (item, node)) in items.iter().zip(nodes).enumerate() {
                encode_value(item, node, out).map_err(|e| e.within(i))?;
            }
        }
        (TypeNode::Record(schema), Value::Record(record)) => {
            if !record.has_schema(schema) {
                return Err(mismatch(node, value));
            }
            encode_record(record, out)?;
        }
        (node, value) => return Err(mismatch(node, value)),
    }
    Ok(())
}
