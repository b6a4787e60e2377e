// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Condition opcodes and parsed conditions.

use std::fmt;

use serde_json::Value as Json;

use crate::dynamic::{CustomCodec, TextForm, TypeNode};
use crate::error::{
    ConversionError, EncodeError, Mismatch, ParseError, ParseErrorKind, SchemaError,
};
use crate::ser::json::str_from_json;
use crate::ser::{Cursor, Streamable};
use crate::types::Bytes;

/// Generate the opcode enum with its byte and name tables.
macro_rules! condition_opcodes {
    ($($variant:ident = $code:literal),+ $(,)?) => {
        /// Condition opcode: one byte on the wire, its name in JSON.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum ConditionOpcode {
            $($variant = $code),+
        }

        impl ConditionOpcode {
            pub const ALL: &'static [ConditionOpcode] = &[$(ConditionOpcode::$variant),+];

            pub fn from_u8(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

condition_opcodes! {
    REMARK = 1,
    AGG_SIG_UNSAFE = 49,
    AGG_SIG_ME = 50,
    CREATE_COIN = 51,
    RESERVE_FEE = 52,
    CREATE_COIN_ANNOUNCEMENT = 60,
    ASSERT_COIN_ANNOUNCEMENT = 61,
    CREATE_PUZZLE_ANNOUNCEMENT = 62,
    ASSERT_PUZZLE_ANNOUNCEMENT = 63,
    ASSERT_MY_COIN_ID = 70,
    ASSERT_MY_PARENT_ID = 71,
    ASSERT_MY_PUZZLEHASH = 72,
    ASSERT_MY_AMOUNT = 73,
    ASSERT_SECONDS_RELATIVE = 80,
    ASSERT_SECONDS_ABSOLUTE = 81,
    ASSERT_HEIGHT_RELATIVE = 82,
    ASSERT_HEIGHT_ABSOLUTE = 83,
}

impl ConditionOpcode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ConditionOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const CONDITION_OPCODE: CustomCodec = CustomCodec {
    name: "ConditionOpcode",
    min_size: 1,
    size_hint: one_byte,
    check: known_opcode,
    text: Some(TextForm {
        render: render_opcode,
        parse: parse_opcode,
    }),
};

fn one_byte(_: &[u8]) -> Result<usize, ParseErrorKind> {
    Ok(1)
}

fn known_opcode(blob: &[u8]) -> Result<(), String> {
    match blob {
        [code] if ConditionOpcode::from_u8(*code).is_some() => Ok(()),
        [code] => Err(format!("unknown opcode {code}")),
        _ => Err(format!("opcode must be 1 byte, got {}", blob.len())),
    }
}

fn render_opcode(blob: &[u8]) -> String {
    match blob {
        [code] => match ConditionOpcode::from_u8(*code) {
            Some(opcode) => opcode.name().to_string(),
            None => hex::encode(blob),
        },
        _ => hex::encode(blob),
    }
}

fn parse_opcode(text: &str) -> Result<Vec<u8>, String> {
    ConditionOpcode::from_name(text)
        .map(|opcode| vec![opcode.code()])
        .ok_or_else(|| format!("unknown opcode name `{text}`"))
}

impl Streamable for ConditionOpcode {
    const MIN_SIZE: usize = 1;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::Custom(CONDITION_OPCODE))
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.push(self.code());
        Ok(())
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let blob = cursor.read_custom(&CONDITION_OPCODE)?;
        match blob {
            [code] => ConditionOpcode::from_u8(*code),
            _ => None,
        }
        .ok_or_else(|| {
            ParseErrorKind::Custom {
                codec: CONDITION_OPCODE.name,
                reason: format!("unknown opcode {}", hex::encode(blob)),
            }
            .into()
        })
    }

    fn to_json(&self) -> Json {
        Json::String(self.name().to_string())
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        let name = str_from_json(json)?;
        ConditionOpcode::from_name(name).ok_or_else(|| {
            Mismatch::Rejected {
                codec: CONDITION_OPCODE.name,
                reason: format!("unknown opcode name `{name}`"),
            }
            .into()
        })
    }
}

/// A parsed condition: `(opcode var1 var2 ...)`.
#[derive(Debug, Clone, PartialEq, Eq, crate::Streamable)]
pub struct ConditionWithArgs {
    pub opcode: ConditionOpcode,
    pub vars: Vec<Bytes>,
}
