// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values and immutable record instances.

use std::sync::Arc;

use crate::dynamic::{RecordSchema, TypeNode};
use crate::error::{ConstructionTypeError, Mismatch};

/// A dynamic value that can hold anything a [`TypeNode`] describes.
///
/// `FixedBytes` and `Custom` leaves are carried as [`Value::Bytes`]; the
/// node they are checked against supplies the length and codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    UInt(u128),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    Optional(Option<Box<Value>>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn some(inner: Value) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Self::Optional(None)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::Str(_) => "string",
            Self::Optional(_) => "optional",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Record(_) => "record",
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Check that this value conforms exactly to `node`.
    ///
    /// The accepted pairings beyond same-kind matches are: an unsized
    /// `UInt` for any width it fits in, `Bytes` of exactly `n` bytes for
    /// `FixedBytes(n)`, and `Bytes` a custom codec sizes and accepts.
    pub fn conforms_to(&self, node: &TypeNode) -> Result<(), ConstructionTypeError> {
        match (node, self) {
            (TypeNode::UInt(width), Value::UInt(v)) => {
                if *v > width.max_value() {
                    return Err(Mismatch::OutOfRange {
                        bits: width.bits(),
                        value: v.to_string(),
                    }
                    .into());
                }
                Ok(())
            }
            (TypeNode::Bool, Value::Bool(_))
            | (TypeNode::Bytes, Value::Bytes(_))
            | (TypeNode::Str, Value::Str(_)) => Ok(()),
            (TypeNode::FixedBytes(n), Value::Bytes(bytes)) => {
                if bytes.len() != *n {
                    return Err(Mismatch::WrongLength {
                        expected: *n,
                        actual: bytes.len(),
                    }
                    .into());
                }
                Ok(())
            }
            (TypeNode::Custom(codec), Value::Bytes(bytes)) => {
                let hint = (codec.size_hint)(bytes).map_err(|kind| Mismatch::Rejected {
                    codec: codec.name,
                    reason: kind.to_string(),
                })?;
                if hint != bytes.len() {
                    return Err(Mismatch::WrongLength {
                        expected: hint,
                        actual: bytes.len(),
                    }
                    .into());
                }
                (codec.check)(bytes).map_err(|reason| Mismatch::Rejected {
                    codec: codec.name,
                    reason,
                })?;
                Ok(())
            }
            (TypeNode::Optional(inner), Value::Optional(opt)) => match opt {
                Some(value) => value.conforms_to(inner),
                None => Ok(()),
            },
            (TypeNode::List(element), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    item.conforms_to(element).map_err(|e| e.within(i))?;
                }
                Ok(())
            }
            (TypeNode::Tuple(nodes), Value::Tuple(items)) => {
                if nodes.len() != items.len() {
                    return Err(Mismatch::WrongArity {
                        expected: nodes.len(),
                        actual: items.len(),
                    }
                    .into());
                }
                for (i, (item, node)) in items.iter().zip(nodes).enumerate() {
                    item.conforms_to(node).map_err(|e| e.within(i))?;
                }
                Ok(())
            }
            // A Record value was validated when it was built; only its
            // schema has to match.
            (TypeNode::Record(schema), Value::Record(record)) => {
                if !record.has_schema(schema) {
                    return Err(Mismatch::WrongType {
                        expected: schema.name().to_string(),
                        found: "record",
                    }
                    .into());
                }
                Ok(())
            }
            (node, value) => Err(Mismatch::WrongType {
                expected: node.to_string(),
                found: value.kind_name(),
            }
            .into()),
        }
    }
}

macro_rules! impl_from_uint {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::UInt(u128::from(v))
            }
        })*
    };
}

impl_from_uint!(u8, u16, u32, u64, u128);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Option<Value>> for Value {
    fn from(v: Option<Value>) -> Self {
        Self::Optional(v.map(Box::new))
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

/// Immutable record instance.
///
/// Every constructor validates each field against the schema; there are
/// no setters, so a `Record` that exists always conforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl Record {
    /// Build from values in declared field order.
    pub fn new(schema: &Arc<RecordSchema>, values: Vec<Value>) -> Result<Self, ConstructionTypeError> {
        if values.len() != schema.len() {
            return Err(ConstructionTypeError::new(Mismatch::WrongArity {
                expected: schema.len(),
                actual: values.len(),
            }));
        }
        for (field, value) in schema.fields().iter().zip(&values) {
            value
                .conforms_to(field.node())
                .map_err(|e| e.within(field.name()))?;
        }
        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    /// Build from `(name, value)` pairs in any order. Every declared field
    /// must be supplied exactly once.
    pub fn from_fields<I, K>(schema: &Arc<RecordSchema>, fields: I) -> Result<Self, ConstructionTypeError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut slots: Vec<Option<Value>> = vec![None; schema.len()];
        for (name, value) in fields {
            let name = name.as_ref();
            let index = schema
                .field_index(name)
                .ok_or_else(|| ConstructionTypeError::new(Mismatch::UnknownField(name.to_string())))?;
            if slots[index].replace(value).is_some() {
                return Err(Mismatch::DuplicateField(name.to_string()).into());
            }
        }
        let mut values = Vec::with_capacity(slots.len());
        for (slot, field) in slots.into_iter().zip(schema.fields()) {
            match slot {
                Some(value) => values.push(value),
                None => return Err(Mismatch::MissingField(field.name().to_string()).into()),
            }
        }
        Self::new(schema, values)
    }

    /// Assemble a record whose values are known to conform (decoder and
    /// converter output, built node by node).
    pub(crate) fn from_parts(schema: &Arc<RecordSchema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), schema.len());
        Self {
            schema: Arc::clone(schema),
            values,
        }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.field_index(name).map(|i| &self.values[i])
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(field name, value)` pairs in declared order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name())
            .zip(&self.values)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub(crate) fn has_schema(&self, schema: &Arc<RecordSchema>) -> bool {
        Arc::ptr_eq(&self.schema, schema) || *self.schema == **schema
    }
}
