// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read cursor and write helpers for the canonical wire form.
//!
//! All integers are big-endian at their declared width. Length and count
//! prefixes are 4-byte big-endian unsigned. Presence flags and booleans are
//! exactly one byte restricted to `0x00`/`0x01`. There is no padding.

use crate::dynamic::{CustomCodec, UIntWidth};
use crate::error::{EncodeError, EncodeErrorKind, ParseError, ParseErrorKind};

/// Generate big-endian read methods for unsigned integer types.
macro_rules! impl_read_be {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type, ParseError> {
            let bytes = self.read_array::<$size>()?;
            Ok(<$type>::from_be_bytes(bytes))
        }
    };
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
///
/// A cursor is the unit of a "stream": decoders invoked on a shared cursor
/// consume their own portion and leave the rest for whoever comes next.
/// Only [`Cursor::finish`] (called by top-level decodes) insists that nothing
/// is left over.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_be!(read_u8, u8, 1);
    impl_read_be!(read_u16, u16, 2);
    impl_read_be!(read_u32, u32, 4);
    impl_read_be!(read_u64, u64, 8);
    impl_read_be!(read_u128, u128, 16);

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.offset.min(self.buffer.len())..]
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Fail with `UnexpectedEndOfInput` unless `needed` bytes remain.
    pub fn ensure_available(&self, needed: usize) -> Result<(), ParseError> {
        let available = self.remaining();
        if needed > available {
            return Err(ParseErrorKind::UnexpectedEndOfInput {
                offset: self.offset,
                needed,
                available,
            }
            .into());
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        self.ensure_available(len)?;
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read an unsigned integer of `width`, widened to `u128`.
    pub fn read_uint(&mut self, width: UIntWidth) -> Result<u128, ParseError> {
        let bytes = self.read_bytes(width.bytes())?;
        Ok(bytes
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte)))
    }

    /// Read a boolean or presence flag. Only `0x00` and `0x01` are accepted.
    pub fn read_flag(&mut self) -> Result<bool, ParseError> {
        let offset = self.offset;
        match self.read_u8()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            value => Err(ParseErrorKind::InvalidDiscriminant { offset, value }.into()),
        }
    }

    /// Read a 4-byte big-endian length or count prefix.
    pub fn read_length(&mut self) -> Result<usize, ParseError> {
        Ok(self.read_u32()? as usize)
    }

    /// Read a length-prefixed byte string.
    pub fn read_prefixed(&mut self) -> Result<&'a [u8], ParseError> {
        let len = self.read_length()?;
        self.read_bytes(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'a str, ParseError> {
        let len = self.read_length()?;
        let offset = self.offset;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes).map_err(|_| ParseErrorKind::InvalidUtf8 { offset }.into())
    }

    /// Read a custom blob: the codec's size hint bounds the read, the codec's
    /// check validates the exact slice.
    pub fn read_custom(&mut self, codec: &CustomCodec) -> Result<&'a [u8], ParseError> {
        let base = self.offset;
        let len = (codec.size_hint)(self.rest()).map_err(|kind| kind.shifted(base))?;
        let bytes = self.read_bytes(len)?;
        (codec.check)(bytes).map_err(|reason| ParseErrorKind::Custom {
            codec: codec.name,
            reason,
        })?;
        Ok(bytes)
    }

    /// Consume the cursor, failing with `TrailingBytes` if input remains.
    ///
    /// This is the top-level "no extra bytes" policy; decoders working on a
    /// shared stream never call it for their own sub-portion.
    pub fn finish(self) -> Result<(), ParseError> {
        let remaining = self.remaining();
        if remaining > 0 {
            log::trace!(
                "rejecting input: {} trailing bytes after {} consumed",
                remaining,
                self.offset
            );
            return Err(ParseErrorKind::TrailingBytes {
                consumed: self.offset,
                remaining,
            }
            .into());
        }
        Ok(())
    }
}

/// Append the low `width` bytes of `value`, big-endian.
///
/// Callers guarantee `value` fits in `width`; the encoder range-checks
/// dynamic values before getting here.
pub fn put_uint(out: &mut Vec<u8>, value: u128, width: UIntWidth) {
    let bytes = value.to_be_bytes();
    out.extend_from_slice(&bytes[bytes.len() - width.bytes()..]);
}

pub fn put_flag(out: &mut Vec<u8>, flag: bool) {
    out.push(u8::from(flag));
}

/// Append a 4-byte big-endian length or count prefix.
pub fn put_length(out: &mut Vec<u8>, len: usize) -> Result<(), EncodeError> {
    let prefix = u32::try_from(len).map_err(|_| EncodeErrorKind::LengthOverflow { len })?;
    out.extend_from_slice(&prefix.to_be_bytes());
    Ok(())
}

/// Append a length-prefixed byte string.
pub fn put_prefixed(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), EncodeError> {
    put_length(out, bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(())
}

/// Append a custom blob after checking it against its codec.
pub fn put_custom(out: &mut Vec<u8>, codec: &CustomCodec, blob: &[u8]) -> Result<(), EncodeError> {
    let expected = (codec.size_hint)(blob).map_err(|kind| {
        EncodeErrorKind::ValueMismatch(crate::error::Mismatch::Rejected {
            codec: codec.name,
            reason: kind.to_string(),
        })
    })?;
    if expected != blob.len() {
        return Err(EncodeErrorKind::SizeMismatch {
            codec: codec.name,
            expected,
            actual: blob.len(),
        }
        .into());
    }
    (codec.check)(blob).map_err(|reason| {
        EncodeErrorKind::ValueMismatch(crate::error::Mismatch::Rejected {
            codec: codec.name,
            reason,
        })
    })?;
    out.extend_from_slice(blob);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_U16: u16 = 0xCDEF;
    const TEST_U32: u32 = 0x1234_5678;
    const TEST_U64: u64 = 0x1122_3344_5566_7788;

    #[test]
    fn test_cursor_reads_big_endian() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&TEST_U16.to_be_bytes());
        buffer.extend_from_slice(&TEST_U32.to_be_bytes());
        buffer.extend_from_slice(&TEST_U64.to_be_bytes());

        let mut cursor = Cursor::new(&buffer);
        assert_eq!(cursor.read_u16().expect("Read u16 should succeed"), TEST_U16);
        assert_eq!(cursor.read_u32().expect("Read u32 should succeed"), TEST_U32);
        assert_eq!(cursor.read_u64().expect("Read u64 should succeed"), TEST_U64);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_uint32_big_vs_little_endian() {
        let mut cursor = Cursor::new(&[0x00, 0x00, 0x00, 0x01]);
        assert_eq!(cursor.read_u32().expect("read"), 1);

        let mut cursor = Cursor::new(&[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(cursor.read_u32().expect("read"), 16_777_216);

        let mut cursor = Cursor::new(&[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(cursor.read_u32().expect("read"), 4_294_967_295);
    }

    #[test]
    fn test_cursor_read_overflow_reports_offset() {
        let buffer = [0u8; 3];
        let mut cursor = Cursor::new(&buffer);
        assert_eq!(cursor.read_u8().expect("Read u8 should succeed"), 0);

        let err = cursor.read_u32().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedEndOfInput {
                offset: 1,
                needed: 4,
                available: 2,
            }
        );
    }

    #[test]
    fn test_read_flag_is_strict() {
        assert!(!Cursor::new(&[0x00]).read_flag().expect("0x00"));
        assert!(Cursor::new(&[0x01]).read_flag().expect("0x01"));

        for bad in [0x02u8, 0xff] {
            let err = Cursor::new(&[bad]).read_flag().unwrap_err();
            assert_eq!(
                err.kind,
                ParseErrorKind::InvalidDiscriminant {
                    offset: 0,
                    value: bad,
                }
            );
        }

        let err = Cursor::new(&[]).read_flag().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedEndOfInput { needed: 1, .. }
        ));
    }

    #[test]
    fn test_read_prefixed_checks_declared_length() {
        let mut input = vec![0x00, 0x00, 0x02, 0x00];
        input.extend(std::iter::repeat(b'a').take(512));
        assert_eq!(
            Cursor::new(&input).read_prefixed().expect("512 bytes"),
            &[b'a'; 512][..]
        );

        // EOF off by one
        let mut short = vec![0x00, 0x00, 0x02, 0x01];
        short.extend(std::iter::repeat(b'a').take(512));
        let err = Cursor::new(&short).read_prefixed().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedEndOfInput {
                needed: 513,
                available: 512,
                ..
            }
        ));

        let err = Cursor::new(&[0xff, 0xff, 0xff, 0xff]).read_prefixed().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedEndOfInput { .. }
        ));
    }

    #[test]
    fn test_read_str_rejects_invalid_utf8() {
        let err = Cursor::new(&[0x00, 0x00, 0x00, 0x01, 0xff])
            .read_str()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8 { offset: 4 });
    }

    #[test]
    fn test_finish_rejects_trailing_bytes() {
        let mut cursor = Cursor::new(&[0x01, 0x02]);
        cursor.read_u8().expect("read");
        let err = cursor.finish().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::TrailingBytes {
                consumed: 1,
                remaining: 1,
            }
        );
    }

    #[test]
    fn test_put_helpers() {
        let mut out = Vec::new();
        put_uint(&mut out, 5, UIntWidth::W32);
        put_flag(&mut out, true);
        put_prefixed(&mut out, b"\xff").expect("prefixed");
        assert_eq!(out, [0, 0, 0, 5, 1, 0, 0, 0, 1, 0xff]);

        let mut out = Vec::new();
        put_uint(&mut out, u128::MAX, UIntWidth::W128);
        assert_eq!(out, [0xff; 16]);
    }
}
