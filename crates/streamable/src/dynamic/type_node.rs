// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Closed-form schema nodes.

use std::fmt;
use std::sync::Arc;

use crate::dynamic::RecordSchemaBuilder;
use crate::error::{ParseErrorKind, SchemaError, SchemaErrorKind};

/// Width of an unsigned integer leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UIntWidth {
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl UIntWidth {
    /// Encoded size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
            Self::W64 => 8,
            Self::W128 => 16,
        }
    }

    pub const fn bits(self) -> u32 {
        (self.bytes() * 8) as u32
    }

    pub const fn max_value(self) -> u128 {
        match self {
            Self::W128 => u128::MAX,
            _ => (1u128 << self.bits()) - 1,
        }
    }

    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            128 => Some(Self::W128),
            _ => None,
        }
    }
}

/// Domain-specific textual JSON form for a custom leaf.
#[derive(Clone, Copy)]
pub struct TextForm {
    pub render: fn(&[u8]) -> String,
    pub parse: fn(&str) -> Result<Vec<u8>, String>,
}

/// Escape hatch for externally defined opaque blobs (program bytecode,
/// opcode bytes, ...).
///
/// The codec never looks inside a custom blob. It only needs to know how
/// many bytes the blob occupies at the head of some input (`size_hint`),
/// whether a given exact slice is acceptable (`check`), and optionally how
/// to render it as JSON text instead of hex (`text`).
#[derive(Clone, Copy)]
pub struct CustomCodec {
    pub name: &'static str,
    /// Smallest possible encoding.
    pub min_size: usize,
    /// Exact length of the blob that starts at the head of the input.
    pub size_hint: fn(&[u8]) -> Result<usize, ParseErrorKind>,
    pub check: fn(&[u8]) -> Result<(), String>,
    pub text: Option<TextForm>,
}

impl fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCodec")
            .field("name", &self.name)
            .field("min_size", &self.min_size)
            .field("text", &self.text.is_some())
            .finish()
    }
}

// Codecs are identified by name; two registrations under one name are the
// same leaf type.
impl PartialEq for CustomCodec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CustomCodec {}

/// Every list element must take at least one byte, so a decoded count is
/// never larger than the input that carries it.
pub(crate) fn check_list_element(element: &TypeNode) -> Result<(), SchemaError> {
    if element.min_size() > 0 {
        return Ok(());
    }
    Err(SchemaErrorKind::UnsupportedType {
        declared: format!("Vec<{element}>"),
        reason: "list elements must encode to at least one byte",
    }
    .into())
}

/// Schema node: how one declared type is encoded, decoded and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    UInt(UIntWidth),
    Bool,
    /// Variable-length byte string.
    Bytes,
    /// Exactly `n` raw bytes.
    FixedBytes(usize),
    Str,
    Optional(Box<TypeNode>),
    List(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    Record(Arc<RecordSchema>),
    Custom(CustomCodec),
}

impl TypeNode {
    pub fn optional(inner: TypeNode) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn list(element: TypeNode) -> Self {
        Self::List(Box::new(element))
    }

    /// Smallest possible encoding of any value of this node.
    pub fn min_size(&self) -> usize {
        match self {
            Self::UInt(width) => width.bytes(),
            Self::Bool | Self::Optional(_) => 1,
            Self::Bytes | Self::Str | Self::List(_) => 4,
            Self::FixedBytes(n) => *n,
            Self::Tuple(items) => items.iter().map(TypeNode::min_size).sum(),
            Self::Record(schema) => schema.min_size(),
            Self::Custom(codec) => codec.min_size,
        }
    }

    /// Reject shapes the codec refuses to carry: the empty tuple, and lists
    /// whose elements can encode to zero bytes.
    ///
    /// Record schemas are checked when they are built, so this does not
    /// descend into them.
    pub fn check_shape(&self) -> Result<(), SchemaError> {
        match self {
            Self::Optional(inner) => inner.check_shape(),
            Self::List(element) => {
                element.check_shape()?;
                check_list_element(element)
            }
            Self::Tuple(items) if items.is_empty() => Err(SchemaErrorKind::UnsupportedType {
                declared: "()".to_string(),
                reason: "the empty tuple has no encoding",
            }
            .into()),
            Self::Tuple(items) => {
                for (i, item) in items.iter().enumerate() {
                    item.check_shape().map_err(|e| e.within(i))?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Short lowercase kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Str => "string",
            Self::Optional(_) => "optional",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Record(_) => "record",
            Self::Custom(_) => "custom",
        }
    }
}

/// Renders the node as the type expression the resolver accepts.
impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(width) => write!(f, "u{}", width.bits()),
            Self::Bool => f.write_str("bool"),
            Self::Bytes => f.write_str("Bytes"),
            Self::FixedBytes(n) => write!(f, "Bytes{n}"),
            Self::Str => f.write_str("String"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::List(element) => write!(f, "Vec<{element}>"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Record(schema) => f.write_str(schema.name()),
            Self::Custom(codec) => f.write_str(codec.name),
        }
    }
}

/// Ordered field list of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldSchema>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn min_size(&self) -> usize {
        self.fields.iter().map(|f| f.node.min_size()).sum()
    }

    /// Multi-line rendering of the schema tree, nested records expanded.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, 0);
        out
    }

    fn describe_into(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;

        let pad = "  ".repeat(depth);
        let _ = writeln!(out, "{pad}{} {{", self.name);
        for field in &self.fields {
            let _ = writeln!(out, "{pad}  {}: {}", field.name, field.node);
            for nested in field.node.records() {
                nested.describe_into(out, depth + 2);
            }
        }
        let _ = writeln!(out, "{pad}}}");
    }
}

impl TypeNode {
    /// Record schemas directly reachable from this node (not through other
    /// records).
    fn records(&self) -> Vec<&Arc<RecordSchema>> {
        match self {
            Self::Record(schema) => vec![schema],
            Self::Optional(inner) | Self::List(inner) => inner.records(),
            Self::Tuple(items) => items.iter().flat_map(TypeNode::records).collect(),
            _ => Vec::new(),
        }
    }
}

/// One named field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub(crate) name: String,
    pub(crate) node: TypeNode,
}

impl FieldSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> &TypeNode {
        &self.node
    }
}
