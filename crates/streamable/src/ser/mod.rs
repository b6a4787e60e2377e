// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical serialization for statically typed values.
//!
//! The four collaborator calls for typed records live here: [`to_bytes`],
//! [`from_bytes`], [`to_json`] and [`from_json`]. They are thin wrappers over
//! [`Streamable`]; the dynamic tier in [`crate::dynamic`] shares the same
//! wire primitives, so both produce identical bytes for the same value.

pub mod cursor;
mod impls;
pub mod json;
pub mod traits;

pub use cursor::{put_custom, put_flag, put_length, put_prefixed, put_uint, Cursor};
pub use traits::Streamable;

use crate::error::{ConversionError, EncodeError, ParseError};

/// Canonical bytes of `value`.
pub fn to_bytes<T: Streamable>(value: &T) -> Result<Vec<u8>, EncodeError> {
    value.to_bytes()
}

/// Decode a complete `T`; trailing input is rejected.
pub fn from_bytes<T: Streamable>(bytes: &[u8]) -> Result<T, ParseError> {
    T::from_bytes(bytes)
}

pub fn to_json<T: Streamable>(value: &T) -> serde_json::Value {
    value.to_json()
}

pub fn from_json<T: Streamable>(json: &serde_json::Value) -> Result<T, ConversionError> {
    T::from_json(json)
}
