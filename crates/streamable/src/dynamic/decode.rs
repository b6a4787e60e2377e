// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven binary decoder.
//!
//! Every step knows how many bytes it needs from the node alone (plus, for
//! variable-length shapes, a prefix it has just read). Nothing is guessed.

use std::sync::Arc;

use crate::dynamic::{check_list_element, Record, RecordSchema, TypeNode, Value};
use crate::error::{ParseError, ParseErrorKind};
use crate::ser::Cursor;

/// Decode a complete record. Trailing input is an error.
pub fn decode(schema: &Arc<RecordSchema>, bytes: &[u8]) -> Result<Record, ParseError> {
    let mut cursor = Cursor::new(bytes);
    let record = decode_record(&mut cursor, schema)?;
    cursor.finish()?;
    Ok(record)
}

/// Decode a complete value of `node`. Trailing input is an error.
pub fn decode_value(node: &TypeNode, bytes: &[u8]) -> Result<Value, ParseError> {
    let mut cursor = Cursor::new(bytes);
    let value = decode_from(&mut cursor, node)?;
    cursor.finish()?;
    Ok(value)
}

fn decode_record(cursor: &mut Cursor<'_>, schema: &Arc<RecordSchema>) -> Result<Record, ParseError> {
    let mut values = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        values.push(decode_from(cursor, field.node()).map_err(|e| e.within(field.name()))?);
    }
    Ok(Record::from_parts(schema, values))
}

/// Reject a count whose elements cannot possibly fit in what is left.
///
/// `min_size` is at least 1 for every list the codec accepts, so `count`
/// never exceeds the remaining input.
pub(crate) fn check_count(cursor: &Cursor<'_>, count: usize, min_size: usize) -> Result<(), ParseError> {
    let needed = count.saturating_mul(min_size);
    if needed > cursor.remaining() {
        return Err(ParseErrorKind::UnexpectedEndOfInput {
            offset: cursor.offset(),
            needed,
            available: cursor.remaining(),
        }
        .into());
    }
    Ok(())
}

/// Decode one value from a shared stream.
///
/// Consumes exactly the value's bytes and leaves the rest of the cursor
/// untouched; no trailing-bytes check applies here.
pub fn decode_from(cursor: &mut Cursor<'_>, node: &TypeNode) -> Result<Value, ParseError> {
    let value = match node {
        TypeNode::UInt(width) => Value::UInt(cursor.read_uint(*width)?),
        TypeNode::Bool => Value::Bool(cursor.read_flag()?),
        TypeNode::Bytes => Value::Bytes(cursor.read_prefixed()?.to_vec()),
        TypeNode::FixedBytes(n) => Value::Bytes(cursor.read_bytes(*n)?.to_vec()),
        TypeNode::Str => Value::Str(cursor.read_str()?.to_string()),
        TypeNode::Optional(inner) => {
            if cursor.read_flag()? {
                Value::some(decode_from(cursor, inner)?)
            } else {
                Value::none()
            }
        }
        TypeNode::List(element) => {
            check_list_element(element)?;
            let count = cursor.read_length()?;
            check_count(cursor, count, element.min_size())?;
            let mut items = Vec::with_capacity(count.min(cursor.remaining()));
            for i in 0..count {
                items.push(decode_from(cursor, element).map_err(|e| e.within(i))?);
            }
            Value::List(items)
        }
        TypeNode::Tuple(nodes) => {
            let mut items = Vec::with_capacity(nodes.len());
            for (i, node) in nodes.iter().enumerate() {
                items.push(decode_from(cursor, node).map_err(|e| e.within(i))?);
            }
            Value::Tuple(items)
        }
        TypeNode::Record(schema) => Value::Record(decode_record(cursor, schema)?),
        TypeNode::Custom(codec) => Value::Bytes(cursor.read_custom(codec)?.to_vec()),
    };
    Ok(value)
}
