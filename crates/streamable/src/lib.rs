// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # streamable - canonical serialization for consensus records
//!
//! Every record has exactly one byte encoding and one JSON form. Two nodes
//! that agree on a value agree on its bytes, so hashes and signatures over
//! those bytes agree too.
//!
//! ## Quick Start
//!
//! ```rust
//! use streamable::{Bytes32, Streamable};
//!
//! #[derive(Debug, PartialEq, Streamable)]
//! struct Payment {
//!     to: Bytes32,
//!     amount: u64,
//!     memo: Option<String>,
//! }
//!
//! let payment = Payment { to: Bytes32::new([7; 32]), amount: 30, memo: None };
//! let bytes = payment.to_bytes().unwrap();
//! assert_eq!(bytes.len(), 32 + 8 + 1);
//! assert_eq!(Payment::from_bytes(&bytes).unwrap(), payment);
//! assert_eq!(payment.to_json()["amount"], 30);
//! ```
//!
//! ## Wire format
//!
//! | Type | Encoding |
//! |------|----------|
//! | `u8`..`u128` | fixed width, big-endian |
//! | `bool` | one byte, `0x00` or `0x01`; anything else is rejected |
//! | `String`, [`Bytes`] | 4-byte big-endian length, then the bytes |
//! | [`BytesN<N>`] | exactly `N` bytes |
//! | `Option<T>` | `0x00`, or `0x01` followed by `T` |
//! | `Vec<T>` | 4-byte big-endian count, then the elements |
//! | tuples | elements in order |
//! | records | fields in declaration order, no tags |
//! | custom leaves | self-delimiting, measured by the leaf's codec |
//!
//! Decoding a complete value rejects trailing input; decoding a value
//! embedded in a larger stream does not.
//!
//! ## Two tiers
//!
//! - [`Streamable`] and `#[derive(Streamable)]` for records known at compile
//!   time.
//! - [`dynamic`] for records whose layout is only known at runtime: schemas
//!   built with [`RecordSchemaBuilder`], resolved from type expressions or
//!   loaded from schema documents.
//!
//! Both share the primitives in [`ser::cursor`], and every typed record is
//! published to the [`registry`] under its name, so the two tiers produce
//! identical bytes and JSON for the same record.
//!
//! ## Record contract
//!
//! The derive rejects anything without a canonical encoding:
//!
//! ```compile_fail
//! #[derive(streamable::Streamable)]
//! struct Signed {
//!     delta: i64,
//! }
//! ```
//!
//! ```compile_fail
//! #[derive(streamable::Streamable)]
//! struct Lookup {
//!     table: std::collections::HashMap<String, u32>,
//! }
//! ```
//!
//! ```compile_fail
//! #[derive(streamable::Streamable)]
//! enum Choice {
//!     A,
//!     B,
//! }
//! ```
//!
//! ```compile_fail
//! #[derive(streamable::Streamable)]
//! struct Node {
//!     children: Vec<Node>,
//! }
//! ```
//!
//! ```compile_fail
//! #[derive(streamable::Streamable)]
//! struct Counter {
//!     hits: std::cell::Cell<u32>,
//! }
//! ```

// Lets the derive's `::streamable::` paths resolve inside this crate.
extern crate self as streamable;

/// Runtime schemas, values and the schema-driven codec.
pub mod dynamic;
/// Error types and traces.
pub mod error;
/// Process-wide record and custom codec registry.
pub mod registry;
/// Typed encoding, decoding and JSON.
pub mod ser;
/// Built-in leaves and consensus records.
pub mod types;
/// Peer protocol messages.
pub mod protocols;

pub use dynamic::{Record, RecordSchema, RecordSchemaBuilder, TypeNode, Value};
pub use error::{
    ConstructionTypeError, ConversionError, EncodeError, Mismatch, ParseError, SchemaError, Trace,
};
pub use ser::{Cursor, Streamable};
pub use streamable_derive::Streamable;
pub use types::{Bytes, Bytes100, Bytes32, Bytes4, Bytes48, Bytes480, Bytes8, Bytes96, BytesN};

#[doc(hidden)]
pub use serde_json;
