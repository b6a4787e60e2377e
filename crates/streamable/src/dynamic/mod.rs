// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic records
//!
//! Schema-driven encode/decode/JSON without compile-time type knowledge.
//! Used by tools, schema files and anything that only learns a record's
//! layout at runtime.
//!
//! # Features
//!
//! - **TypeNode**: Closed-form schema tag (integers, bytes, options, lists, tuples, records, custom blobs)
//! - **Builder API**: Fluent interface for building record schemas
//! - **Resolver**: Type expressions such as `Vec<Option<Bytes32>>` to nodes
//! - **Record**: Immutable, validated record instance
//! - **Codec**: Canonical bytes and JSON for any value under its node
//!
//! # Example
//!
//! ```rust
//! use streamable::dynamic::{self, Record, RecordSchemaBuilder, UIntWidth, Value};
//!
//! let schema = RecordSchemaBuilder::new("Pair")
//!     .uint_field("a", UIntWidth::W32)
//!     .bool_field("b")
//!     .build()
//!     .unwrap();
//!
//! let record = Record::new(&schema, vec![Value::UInt(5), Value::Bool(true)]).unwrap();
//! let bytes = dynamic::encode(&record).unwrap();
//! assert_eq!(bytes, [0x00, 0x00, 0x00, 0x05, 0x01]);
//! assert_eq!(dynamic::decode(&schema, &bytes).unwrap(), record);
//! ```

mod builder;
mod decode;
pub mod document;
mod encode;
mod json;
pub mod resolver;
mod type_node;
mod value;

pub use builder::RecordSchemaBuilder;
pub use decode::{decode, decode_from, decode_value};
pub(crate) use decode::check_count;
pub use document::{DocumentError, SchemaDocument};
pub use encode::{encode, encode_value};
pub use json::{from_json, to_json, value_from_json, value_to_json};
pub use resolver::{resolve, GlobalScope, LocalScope, Resolver, Scope};
pub use type_node::{CustomCodec, FieldSchema, RecordSchema, TextForm, TypeNode, UIntWidth};
pub(crate) use type_node::check_list_element;
pub use value::{Record, Value};

#[cfg(test)]
mod tests;
