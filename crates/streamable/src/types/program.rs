// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serialized CLVM programs as a custom leaf.
//!
//! The codec does not interpret programs. It only needs the length of the
//! self-delimiting serialization:
//!
//! | First byte | Meaning |
//! |------------|---------|
//! | `0xff` | pair: two more objects follow |
//! | `0x80` | nil |
//! | `0x00..=0x7f` | one-byte atom |
//! | `0x81..=0xfe` | atom; the count of leading 1 bits is the size prefix length |

use serde_json::Value as Json;

use crate::dynamic::{CustomCodec, TypeNode};
use crate::error::{ConversionError, EncodeError, ParseError, ParseErrorKind, SchemaError};
use crate::ser::json::{custom_from_json, custom_to_json};
use crate::ser::{put_custom, Cursor, Streamable};

const PAIR: u8 = 0xff;
const MAX_SIZE_PREFIX: usize = 6;
const MAX_ATOM_SIZE: u64 = 0x4_0000_0000;

pub const SERIALIZED_PROGRAM: CustomCodec = CustomCodec {
    name: "SerializedProgram",
    min_size: 1,
    size_hint: serialized_length,
    check: accept_any,
    text: None,
};

fn accept_any(_: &[u8]) -> Result<(), String> {
    Ok(())
}

fn bad_encoding(reason: &str) -> ParseErrorKind {
    ParseErrorKind::Custom {
        codec: SERIALIZED_PROGRAM.name,
        reason: reason.to_string(),
    }
}

fn truncated(buf: &[u8], offset: usize, needed: usize) -> ParseErrorKind {
    ParseErrorKind::UnexpectedEndOfInput {
        offset,
        needed,
        available: buf.len().saturating_sub(offset),
    }
}

/// Length of the serialized program at the head of `buf`.
pub fn serialized_length(buf: &[u8]) -> Result<usize, ParseErrorKind> {
    let mut pending = 1usize;
    let mut pos = 0usize;
    while pending > 0 {
        pending -= 1;
        let Some(&first) = buf.get(pos) else {
            return Err(truncated(buf, pos, 1));
        };
        pos += 1;
        if first == PAIR {
            pending += 2;
            continue;
        }
        if first & 0x80 == 0 {
            continue;
        }

        let mut prefix_len = 0usize;
        let mut mask = 0x80u8;
        let mut high = first;
        while high & mask != 0 {
            prefix_len += 1;
            high &= !mask;
            mask >>= 1;
        }
        if prefix_len > MAX_SIZE_PREFIX {
            return Err(bad_encoding("atom size prefix too long"));
        }
        let rest = prefix_len - 1;
        let Some(size_bytes) = buf.get(pos..pos + rest) else {
            return Err(truncated(buf, pos, rest));
        };
        pos += rest;
        let size = size_bytes
            .iter()
            .fold(u64::from(high), |acc, b| (acc << 8) | u64::from(*b));
        if size >= MAX_ATOM_SIZE {
            return Err(bad_encoding("atom too large"));
        }
        let size = usize::try_from(size).map_err(|_| bad_encoding("atom too large"))?;
        let end = pos.checked_add(size).ok_or_else(|| bad_encoding("atom too large"))?;
        if end > buf.len() {
            return Err(truncated(buf, pos, size));
        }
        pos = end;
    }
    Ok(pos)
}

/// A complete serialized CLVM program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedProgram(Vec<u8>);

impl SerializedProgram {
    /// Wrap `bytes`, which must hold exactly one program.
    pub fn new(bytes: Vec<u8>) -> Result<Self, ParseError> {
        let len = serialized_length(&bytes)?;
        if len != bytes.len() {
            return Err(ParseErrorKind::TrailingBytes {
                consumed: len,
                remaining: bytes.len() - len,
            }
            .into());
        }
        Ok(Self(bytes))
    }

    /// The empty program, `()`.
    pub fn nil() -> Self {
        Self(vec![0x80])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Default for SerializedProgram {
    fn default() -> Self {
        Self::nil()
    }
}

impl Streamable for SerializedProgram {
    const MIN_SIZE: usize = 1;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::Custom(SERIALIZED_PROGRAM))
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        put_custom(out, &SERIALIZED_PROGRAM, &self.0)
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        Ok(Self(cursor.read_custom(&SERIALIZED_PROGRAM)?.to_vec()))
    }

    fn to_json(&self) -> Json {
        custom_to_json(&SERIALIZED_PROGRAM, &self.0)
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        Ok(Self(custom_from_json(&SERIALIZED_PROGRAM, json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_length() {
        assert_eq!(serialized_length(&[0x80]), Ok(1));
        assert_eq!(serialized_length(&[0x01]), Ok(1));
        assert_eq!(serialized_length(&[0xff, 0x80, 0x80]), Ok(3));
        assert_eq!(serialized_length(&[0x83, 1, 2, 3, 0xaa]), Ok(4));
        assert_eq!(serialized_length(&[0xff, 0x01, 0xff, 0x82, 9, 9, 0x80]), Ok(7));

        let mut two_byte_prefix = vec![0xc0, 0x40];
        two_byte_prefix.extend(std::iter::repeat(0u8).take(64));
        assert_eq!(serialized_length(&two_byte_prefix), Ok(66));
    }

    #[test]
    fn test_serialized_length_truncation() {
        assert!(matches!(
            serialized_length(&[]),
            Err(ParseErrorKind::UnexpectedEndOfInput { offset: 0, .. })
        ));
        assert!(matches!(
            serialized_length(&[0xff, 0x80]),
            Err(ParseErrorKind::UnexpectedEndOfInput { offset: 2, .. })
        ));
        assert!(matches!(
            serialized_length(&[0x83, 1]),
            Err(ParseErrorKind::UnexpectedEndOfInput {
                offset: 1,
                needed: 3,
                available: 1,
            })
        ));
        assert!(matches!(
            serialized_length(&[0xc0]),
            Err(ParseErrorKind::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_serialized_length_rejects_bad_prefix() {
        assert!(matches!(
            serialized_length(&[0xfe]),
            Err(ParseErrorKind::Custom { .. })
        ));
        assert!(matches!(
            serialized_length(&[0xfc, 0x04, 0, 0, 0, 0]),
            Err(ParseErrorKind::Custom { .. })
        ));
    }

    #[test]
    fn test_program_trailing_byte_fails() {
        let err = SerializedProgram::from_bytes(&[0xff, 0x80, 0x80, 0x00]).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::TrailingBytes { .. }));
        assert!(SerializedProgram::new(vec![0x80, 0x00]).is_err());
        assert_eq!(
            SerializedProgram::from_bytes(&[0xff, 0x80, 0x80]).expect("decode"),
            SerializedProgram::new(vec![0xff, 0x80, 0x80]).expect("program")
        );
    }

    #[test]
    fn test_program_embedded_in_stream() {
        let mut cursor = Cursor::new(&[0x80, 0x01, 0x02]);
        assert_eq!(
            SerializedProgram::parse(&mut cursor).expect("first"),
            SerializedProgram::nil()
        );
        assert_eq!(
            SerializedProgram::parse(&mut cursor).expect("second").as_bytes(),
            [0x01]
        );
        assert_eq!(cursor.remaining(), 1);
    }
}
