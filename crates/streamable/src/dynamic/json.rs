// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-guided JSON conversion for dynamic values.

use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::dynamic::{Record, RecordSchema, TypeNode, Value};
use crate::error::ConversionError;
use crate::ser::json::{
    bool_from_json, bytes_from_json, bytes_to_json, custom_from_json, custom_to_json,
    expect_array, expect_object, expect_tuple, field, fixed_bytes_from_json, str_from_json,
    uint_from_json, uint_to_json,
};

/// Render a record as a JSON object keyed by field name.
pub fn to_json(record: &Record) -> Json {
    let mut map = Map::with_capacity(record.values().len());
    for (field, value) in record.schema().fields().iter().zip(record.values()) {
        map.insert(field.name().to_string(), render(value, Some(field.node())));
    }
    Json::Object(map)
}

/// Render `value` under `node`, failing if the value does not conform.
pub fn value_to_json(value: &Value, node: &TypeNode) -> Result<Json, ConversionError> {
    value.conforms_to(node)?;
    Ok(render(value, Some(node)))
}

// The node only picks the leaf format (hex or custom text); callers have
// already checked conformance.
fn render(value: &Value, node: Option<&TypeNode>) -> Json {
    match (value, node) {
        (Value::UInt(v), _) => uint_to_json(*v),
        (Value::Bool(b), _) => Json::Bool(*b),
        (Value::Str(s), _) => Json::String(s.clone()),
        (Value::Bytes(blob), Some(TypeNode::Custom(codec))) => custom_to_json(codec, blob),
        (Value::Bytes(bytes), _) => bytes_to_json(bytes),
        (Value::Optional(None), _) => Json::Null,
        (Value::Optional(Some(inner)), Some(TypeNode::Optional(node))) => render(inner, Some(node.as_ref())),
        (Value::Optional(Some(inner)), _) => render(inner, None),
        (Value::List(items), node) => {
            let element = match node {
                Some(TypeNode::List(element)) => Some(element.as_ref()),
                _ => None,
            };
            Json::Array(items.iter().map(|item| render(item, element)).collect())
        }
        (Value::Tuple(items), Some(TypeNode::Tuple(nodes))) => Json::Array(
            items
                .iter()
                .zip(nodes)
                .map(|(item, node)| render(item, Some(node)))
                .collect(),
        ),
        (Value::Tuple(items), _) => Json::Array(items.iter().map(|item| render(item, None)).collect()),
        (Value::Record(record), _) => to_json(record),
    }
}

/// Build a record from its JSON object form.
///
/// Every declared field must be present and no other key is allowed.
pub fn from_json(schema: &Arc<RecordSchema>, json: &Json) -> Result<Record, ConversionError> {
    let declared: Vec<&str> = schema.fields().iter().map(|f| f.name()).collect();
    let map = expect_object(json, schema.name(), &declared)?;
    let mut values = Vec::with_capacity(schema.len());
    for f in schema.fields() {
        let item = field(map, f.name())?;
        values.push(value_from_json(f.node(), item).map_err(|e| e.within(f.name()))?);
    }
    Ok(Record::from_parts(schema, values))
}

/// Convert a JSON value to a [`Value`] conforming to `node`.
pub fn value_from_json(node: &TypeNode, json: &Json) -> Result<Value, ConversionError> {
    let value = match node {
        TypeNode::UInt(width) => Value::UInt(uint_from_json(json, *width)?),
        TypeNode::Bool => Value::Bool(bool_from_json(json)?),
        TypeNode::Bytes => Value::Bytes(bytes_from_json(json)?),
        TypeNode::FixedBytes(n) => Value::Bytes(fixed_bytes_from_json(json, *n)?),
        TypeNode::Str => Value::Str(str_from_json(json)?.to_string()),
        TypeNode::Optional(inner) => match json {
            Json::Null => Value::none(),
            other => Value::some(value_from_json(inner, other)?),
        },
        TypeNode::List(element) => {
            let items = expect_array(json, &node.to_string())?;
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                values.push(value_from_json(element, item).map_err(|e| e.within(i))?);
            }
            Value::List(values)
        }
        TypeNode::Tuple(nodes) => {
            let items = expect_tuple(json, nodes.len(), &node.to_string())?;
            let mut values = Vec::with_capacity(items.len());
            for (i, (item, node)) in items.iter().zip(nodes).enumerate() {
                values.push(value_from_json(node, item).map_err(|e| e.within(i))?);
            }
            Value::Tuple(values)
        }
        TypeNode::Record(schema) => Value::Record(from_json(schema, json)?),
        TypeNode::Custom(codec) => Value::Bytes(custom_from_json(codec, json)?),
    };
    Ok(value)
}
