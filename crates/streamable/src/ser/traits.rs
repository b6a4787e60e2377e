// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The `Streamable` trait
//!
//! Defines the encoding/decoding/JSON contract for statically typed values.
//! Records get it from `#[derive(Streamable)]`; leaves are implemented in
//! [`super::impls`] and in `crate::types`.

use crate::dynamic::TypeNode;
use crate::error::{ConversionError, EncodeError, ParseError, SchemaError};
use crate::ser::Cursor;

/// A value with one canonical byte form and one JSON form.
///
/// Types that do not implement it (signed and floating-point numbers,
/// maps, references, `usize`) cannot appear in a record: the derive fails
/// to compile.
pub trait Streamable: Sized {
    /// Smallest possible encoding, in bytes.
    const MIN_SIZE: usize;

    /// Schema node describing this type. Record schemas are built once and
    /// memoized in the registry.
    fn type_node() -> Result<TypeNode, SchemaError>;

    /// Append the canonical encoding to `out`.
    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError>;

    /// Decode one value from a shared stream.
    ///
    /// Consumes exactly the value's bytes. Never checks for trailing input;
    /// that is [`Streamable::from_bytes`]'s job.
    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError>;

    fn to_json(&self) -> serde_json::Value;

    fn from_json(json: &serde_json::Value) -> Result<Self, ConversionError>;

    /// Canonical encoding as a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(Self::MIN_SIZE);
        self.stream(&mut out)?;
        Ok(out)
    }

    /// Decode a complete value; any byte left over is `TrailingBytes`.
    fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut cursor = Cursor::new(bytes);
        let value = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(value)
    }
}
