// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for the codec.
//!
//! | Error | Raised by | When |
//! |-------|-----------|------|
//! | [`SchemaError`] | resolver, builder, registry | type definition time |
//! | [`ParseError`] | binary decoder | malformed or ambiguous bytes |
//! | [`EncodeError`] | binary encoder | length prefix overflow, bad custom blob |
//! | [`ConversionError`] | JSON converter | JSON shape does not match the schema |
//! | [`ConstructionTypeError`] | [`Record`](crate::Record) constructors | field value does not match its node |
//!
//! Every error carries a [`Trace`]: the field path from the outermost value
//! down to the failing leaf. Decoders and converters append to it while the
//! error unwinds, so `outer.inner.field` names exactly what failed.

use std::fmt;

use thiserror::Error;

/// Field path attached to an error, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace(Vec<String>);

impl Trace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_front(&mut self, segment: String) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for Trace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

fn at(trace: &Trace) -> String {
    if trace.is_empty() {
        String::new()
    } else {
        format!(" (at {trace})")
    }
}

/// Generate the trace plumbing shared by every error wrapper.
macro_rules! impl_traced {
    ($ty:ident, $kind_field:ident, $kind_ty:ty) => {
        impl $ty {
            pub fn new($kind_field: $kind_ty) -> Self {
                Self {
                    $kind_field,
                    trace: Trace::new(),
                }
            }

            /// Prepend `segment` (a field name or list index) to the trace.
            #[must_use]
            pub fn within(mut self, segment: impl fmt::Display) -> Self {
                self.trace.push_front(segment.to_string());
                self
            }
        }

        impl From<$kind_ty> for $ty {
            fn from($kind_field: $kind_ty) -> Self {
                Self::new($kind_field)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// SchemaError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaErrorKind {
    #[error("unsupported type `{declared}`: {reason}")]
    UnsupportedType {
        declared: String,
        reason: &'static str,
    },
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("malformed type `{declared}`: {reason}")]
    MalformedType { declared: String, reason: String },
    #[error("duplicate field `{0}`")]
    DuplicateField(String),
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("record `{0}` is already registered with a different layout")]
    DuplicateRecord(String),
    #[error("record `{0}` contains itself")]
    RecursiveRecord(String),
}

/// A record or field type is not usable by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema error: {kind}{}", at(.trace))]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub trace: Trace,
}

impl_traced!(SchemaError, kind, SchemaErrorKind);

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEndOfInput {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("{remaining} trailing bytes after {consumed} consumed")]
    TrailingBytes { consumed: usize, remaining: usize },
    #[error("invalid discriminant 0x{value:02x} at offset {offset}")]
    InvalidDiscriminant { offset: usize, value: u8 },
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid utf-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("{codec}: {reason}")]
    Custom { codec: &'static str, reason: String },
    /// The target type failed schema resolution and has no codec.
    #[error("{0}")]
    Schema(SchemaError),
}

impl ParseErrorKind {
    /// Rebase offsets reported relative to a sub-slice starting at `base`.
    pub(crate) fn shifted(self, base: usize) -> Self {
        match self {
            Self::UnexpectedEndOfInput {
                offset,
                needed,
                available,
            } => Self::UnexpectedEndOfInput {
                offset: offset + base,
                needed,
                available,
            },
            Self::InvalidDiscriminant { offset, value } => Self::InvalidDiscriminant {
                offset: offset + base,
                value,
            },
            Self::InvalidUtf8 { offset } => Self::InvalidUtf8 {
                offset: offset + base,
            },
            other => other,
        }
    }
}

/// Bytes could not be decoded against the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {kind}{}", at(.trace))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub trace: Trace,
}

impl_traced!(ParseError, kind, ParseErrorKind);

impl From<SchemaError> for ParseError {
    fn from(err: SchemaError) -> Self {
        Self::new(ParseErrorKind::Schema(err))
    }
}

// ---------------------------------------------------------------------------
// Mismatch (shared by conversion and construction)
// ---------------------------------------------------------------------------

/// A value does not fit the shape its type node demands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: String,
        found: &'static str,
    },
    #[error("{value} does not fit in {bits} bits")]
    OutOfRange { bits: u32, value: String },
    #[error("expected {expected} bytes, found {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("expected {expected} elements, found {actual}")]
    WrongArity { expected: usize, actual: usize },
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{0}` supplied more than once")]
    DuplicateField(String),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("rejected by {codec}: {reason}")]
    Rejected { codec: &'static str, reason: String },
    #[error("{0}")]
    Schema(SchemaError),
}

/// A JSON value does not match the schema it is converted against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("conversion error: {mismatch}{}", at(.trace))]
pub struct ConversionError {
    pub mismatch: Mismatch,
    pub trace: Trace,
}

impl_traced!(ConversionError, mismatch, Mismatch);

impl From<SchemaError> for ConversionError {
    fn from(err: SchemaError) -> Self {
        Self::new(Mismatch::Schema(err))
    }
}

/// A record was built with a field value that does not match its node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("construction type error: {mismatch}{}", at(.trace))]
pub struct ConstructionTypeError {
    pub mismatch: Mismatch,
    pub trace: Trace,
}

impl_traced!(ConstructionTypeError, mismatch, Mismatch);

impl From<ConstructionTypeError> for ConversionError {
    fn from(err: ConstructionTypeError) -> Self {
        Self {
            mismatch: err.mismatch,
            trace: err.trace,
        }
    }
}

// ---------------------------------------------------------------------------
// EncodeError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeErrorKind {
    #[error("length {len} exceeds the 4-byte prefix range")]
    LengthOverflow { len: usize },
    #[error("{codec} blob is {actual} bytes but its size hint reports {expected}")]
    SizeMismatch {
        codec: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("value does not match schema: {0}")]
    ValueMismatch(Mismatch),
    #[error("{0}")]
    Schema(SchemaError),
}

/// A value could not be written in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("encode error: {kind}{}", at(.trace))]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
    pub trace: Trace,
}

impl_traced!(EncodeError, kind, EncodeErrorKind);

impl From<SchemaError> for EncodeError {
    fn from(err: SchemaError) -> Self {
        Self::new(EncodeErrorKind::Schema(err))
    }
}
