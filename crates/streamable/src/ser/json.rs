// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON leaf conversions shared by the typed and dynamic tiers.
//!
//! Integers are JSON numbers (u128 beyond `u64::MAX` stays exact thanks to
//! serde_json's `arbitrary_precision`). Byte strings are lowercase hex with
//! no prefix; a leading `0x` is tolerated on input.

use serde_json::{Map, Number, Value as Json};

use crate::dynamic::{CustomCodec, UIntWidth};
use crate::error::{ConversionError, Mismatch};

/// JSON type name for error messages.
pub fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn wrong_type(expected: impl Into<String>, json: &Json) -> ConversionError {
    Mismatch::WrongType {
        expected: expected.into(),
        found: json_kind(json),
    }
    .into()
}

pub fn uint_to_json(value: u128) -> Json {
    if let Ok(small) = u64::try_from(value) {
        return Json::from(small);
    }
    let digits = value.to_string();
    match digits.parse::<Number>() {
        Ok(number) => Json::Number(number),
        Err(_) => Json::String(digits),
    }
}

pub fn uint_from_json(json: &Json, width: UIntWidth) -> Result<u128, ConversionError> {
    let Json::Number(number) = json else {
        return Err(wrong_type(format!("u{}", width.bits()), json));
    };
    let value = match number.as_u64() {
        Some(v) => u128::from(v),
        None if number.is_f64() => {
            return Err(Mismatch::WrongType {
                expected: format!("u{}", width.bits()),
                found: "non-integer number",
            }
            .into())
        }
        None => number.to_string().parse::<u128>().map_err(|_| Mismatch::OutOfRange {
            bits: width.bits(),
            value: number.to_string(),
        })?,
    };
    if value > width.max_value() {
        return Err(Mismatch::OutOfRange {
            bits: width.bits(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(value)
}

pub fn bool_from_json(json: &Json) -> Result<bool, ConversionError> {
    json.as_bool().ok_or_else(|| wrong_type("bool", json))
}

pub fn str_from_json(json: &Json) -> Result<&str, ConversionError> {
    json.as_str().ok_or_else(|| wrong_type("string", json))
}

pub fn bytes_to_json(bytes: &[u8]) -> Json {
    Json::String(hex::encode(bytes))
}

pub fn bytes_from_json(json: &Json) -> Result<Vec<u8>, ConversionError> {
    let text = str_from_json(json)?;
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| Mismatch::InvalidHex(e.to_string()).into())
}

pub fn fixed_bytes_from_json(json: &Json, len: usize) -> Result<Vec<u8>, ConversionError> {
    let bytes = bytes_from_json(json)?;
    if bytes.len() != len {
        return Err(Mismatch::WrongLength {
            expected: len,
            actual: bytes.len(),
        }
        .into());
    }
    Ok(bytes)
}

pub fn custom_to_json(codec: &CustomCodec, blob: &[u8]) -> Json {
    match &codec.text {
        Some(text) => Json::String((text.render)(blob)),
        None => bytes_to_json(blob),
    }
}

/// Read a custom blob from its JSON form and validate it with the codec.
pub fn custom_from_json(codec: &CustomCodec, json: &Json) -> Result<Vec<u8>, ConversionError> {
    let blob = match &codec.text {
        Some(text) => (text.parse)(str_from_json(json)?).map_err(|reason| Mismatch::Rejected {
            codec: codec.name,
            reason,
        })?,
        None => bytes_from_json(json)?,
    };
    let hint = (codec.size_hint)(&blob).map_err(|kind| Mismatch::Rejected {
        codec: codec.name,
        reason: kind.to_string(),
    })?;
    if hint != blob.len() {
        return Err(Mismatch::WrongLength {
            expected: hint,
            actual: blob.len(),
        }
        .into());
    }
    (codec.check)(&blob).map_err(|reason| Mismatch::Rejected {
        codec: codec.name,
        reason,
    })?;
    Ok(blob)
}

pub fn expect_array<'a>(json: &'a Json, expected: &str) -> Result<&'a [Json], ConversionError> {
    match json {
        Json::Array(items) => Ok(items),
        other => Err(wrong_type(expected, other)),
    }
}

/// Array of exactly `arity` elements.
pub fn expect_tuple<'a>(
    json: &'a Json,
    arity: usize,
    expected: &str,
) -> Result<&'a [Json], ConversionError> {
    let items = expect_array(json, expected)?;
    if items.len() != arity {
        return Err(Mismatch::WrongArity {
            expected: arity,
            actual: items.len(),
        }
        .into());
    }
    Ok(items)
}

/// Object whose keys are all among `declared`.
pub fn expect_object<'a>(
    json: &'a Json,
    record: &str,
    declared: &[&str],
) -> Result<&'a Map<String, Json>, ConversionError> {
    let Json::Object(map) = json else {
        return Err(wrong_type(record, json));
    };
    if let Some(unknown) = map.keys().find(|k| !declared.contains(&k.as_str())) {
        return Err(Mismatch::UnknownField(unknown.clone()).into());
    }
    Ok(map)
}

pub fn field<'a>(map: &'a Map<String, Json>, name: &str) -> Result<&'a Json, ConversionError> {
    map.get(name)
        .ok_or_else(|| Mismatch::MissingField(name.to_string()).into())
}
