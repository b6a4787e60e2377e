// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte string leaves: variable-length [`Bytes`] and fixed-length [`BytesN`].

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde_json::Value as Json;

use crate::dynamic::TypeNode;
use crate::error::{ConversionError, EncodeError, ParseError, ParseErrorKind, SchemaError};
use crate::ser::json::{bytes_from_json, bytes_to_json, fixed_bytes_from_json};
use crate::ser::{put_prefixed, Cursor, Streamable};

/// Variable-length byte string: 4-byte length prefix, then the bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl Streamable for Bytes {
    const MIN_SIZE: usize = 4;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::Bytes)
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        put_prefixed(out, &self.0)
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        Ok(Self(cursor.read_prefixed()?.to_vec()))
    }

    fn to_json(&self) -> Json {
        bytes_to_json(&self.0)
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        Ok(Self(bytes_from_json(json)?))
    }
}

/// Exactly `N` raw bytes, no prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BytesN<const N: usize>([u8; N]);

pub type Bytes4 = BytesN<4>;
pub type Bytes8 = BytesN<8>;
pub type Bytes32 = BytesN<32>;
pub type Bytes48 = BytesN<48>;
pub type Bytes96 = BytesN<96>;
pub type Bytes100 = BytesN<100>;
pub type Bytes480 = BytesN<480>;

impl<const N: usize> BytesN<N> {
    pub const LEN: usize = N;

    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice of exactly `N` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let array: [u8; N] = bytes.try_into().map_err(|_| ParseErrorKind::SizeMismatch {
            expected: N,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    pub fn as_array(&self) -> &[u8; N] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl<const N: usize> Default for BytesN<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> Deref for BytesN<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for BytesN<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for BytesN<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> fmt::Display for BytesN<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl<const N: usize> fmt::Debug for BytesN<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes{N}({})", hex::encode(self.0))
    }
}

/// Parses hex, with or without a `0x` prefix.
impl<const N: usize> FromStr for BytesN<N> {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(&Json::String(s.to_string()))
    }
}

impl<const N: usize> Streamable for BytesN<N> {
    const MIN_SIZE: usize = N;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::FixedBytes(N))
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(&self.0);
        Ok(())
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        Ok(Self(cursor.read_array::<N>()?))
    }

    fn to_json(&self) -> Json {
        bytes_to_json(&self.0)
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        let bytes = fixed_bytes_from_json(json, N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(&bytes);
        Ok(Self(array))
    }
}
