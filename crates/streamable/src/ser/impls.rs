// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Streamable` for integers, `bool`, `String`, `Option`, `Vec` and tuples.

use serde_json::Value as Json;

use crate::dynamic::{check_count, check_list_element, TypeNode, UIntWidth};
use crate::error::{ConversionError, EncodeError, ParseError, SchemaError};
use crate::ser::json::{
    bool_from_json, expect_array, expect_tuple, str_from_json, uint_from_json, uint_to_json,
};
use crate::ser::{put_flag, put_length, put_prefixed, Cursor, Streamable};

/// Generate `Streamable` for fixed-width unsigned integers.
macro_rules! impl_uint {
    ($type:ty, $width:expr, $read:ident) => {
        impl Streamable for $type {
            const MIN_SIZE: usize = $width.bytes();

            fn type_node() -> Result<TypeNode, SchemaError> {
                Ok(TypeNode::UInt($width))
            }

            fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
                out.extend_from_slice(&self.to_be_bytes());
                Ok(())
            }

            fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
                cursor.$read()
            }

            fn to_json(&self) -> Json {
                uint_to_json(u128::from(*self))
            }

            fn from_json(json: &Json) -> Result<Self, ConversionError> {
                let value = uint_from_json(json, $width)?;
                // uint_from_json already range-checked against the width
                Ok(value as $type)
            }
        }
    };
}

impl_uint!(u8, UIntWidth::W8, read_u8);
impl_uint!(u16, UIntWidth::W16, read_u16);
impl_uint!(u32, UIntWidth::W32, read_u32);
impl_uint!(u64, UIntWidth::W64, read_u64);
impl_uint!(u128, UIntWidth::W128, read_u128);

impl Streamable for bool {
    const MIN_SIZE: usize = 1;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::Bool)
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        put_flag(out, *self);
        Ok(())
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        cursor.read_flag()
    }

    fn to_json(&self) -> Json {
        Json::Bool(*self)
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        bool_from_json(json)
    }
}

impl Streamable for String {
    const MIN_SIZE: usize = 4;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::Str)
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        put_prefixed(out, self.as_bytes())
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        Ok(cursor.read_str()?.to_string())
    }

    fn to_json(&self) -> Json {
        Json::String(self.clone())
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        Ok(str_from_json(json)?.to_string())
    }
}

impl<T: Streamable> Streamable for Option<T> {
    const MIN_SIZE: usize = 1;

    fn type_node() -> Result<TypeNode, SchemaError> {
        Ok(TypeNode::optional(T::type_node()?))
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self {
            None => {
                put_flag(out, false);
                Ok(())
            }
            Some(value) => {
                put_flag(out, true);
                value.stream(out)
            }
        }
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        if cursor.read_flag()? {
            Ok(Some(T::parse(cursor)?))
        } else {
            Ok(None)
        }
    }

    /// `None` is `null`; `Some(v)` is `v` itself, so `Some(None)` of a
    /// nested option is also `null`.
    fn to_json(&self) -> Json {
        match self {
            None => Json::Null,
            Some(value) => value.to_json(),
        }
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        match json {
            Json::Null => Ok(None),
            other => Ok(Some(T::from_json(other)?)),
        }
    }
}

/// Lists of elements that can encode to zero bytes have no codec.
fn check_element<T: Streamable>() -> Result<(), SchemaError> {
    if T::MIN_SIZE > 0 {
        return Ok(());
    }
    check_list_element(&T::type_node()?)
}

impl<T: Streamable> Streamable for Vec<T> {
    const MIN_SIZE: usize = 4;

    fn type_node() -> Result<TypeNode, SchemaError> {
        let element = T::type_node()?;
        check_list_element(&element)?;
        Ok(TypeNode::list(element))
    }

    fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        check_element::<T>()?;
        put_length(out, self.len())?;
        for (i, item) in self.iter().enumerate() {
            item.stream(out).map_err(|e| e.within(i))?;
        }
        Ok(())
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        check_element::<T>()?;
        let count = cursor.read_length()?;
        check_count(cursor, count, T::MIN_SIZE)?;
        let mut items = Vec::with_capacity(count.min(cursor.remaining()));
        for i in 0..count {
            items.push(T::parse(cursor).map_err(|e| e.within(i))?);
        }
        Ok(items)
    }

    fn to_json(&self) -> Json {
        Json::Array(self.iter().map(Streamable::to_json).collect())
    }

    fn from_json(json: &Json) -> Result<Self, ConversionError> {
        check_element::<T>()?;
        let items = expect_array(json, "list")?;
        let mut values = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            values.push(T::from_json(item).map_err(|e| e.within(i))?);
        }
        Ok(values)
    }
}

/// Generate `Streamable` for tuples: members concatenated, no prefix.
macro_rules! impl_tuple {
    ($arity:literal; $($name:ident $idx:tt),+) => {
        impl<$($name: Streamable),+> Streamable for ($($name,)+) {
            const MIN_SIZE: usize = 0 $(+ $name::MIN_SIZE)+;

            fn type_node() -> Result<TypeNode, SchemaError> {
                Ok(TypeNode::Tuple(vec![
                    $($name::type_node().map_err(|e| e.within($idx))?),+
                ]))
            }

            fn stream(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
                $(self.$idx.stream(out).map_err(|e| e.within($idx))?;)+
                Ok(())
            }

            fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
                Ok(($($name::parse(cursor).map_err(|e| e.within($idx))?,)+))
            }

            fn to_json(&self) -> Json {
                Json::Array(vec![$(self.$idx.to_json()),+])
            }

            fn from_json(json: &Json) -> Result<Self, ConversionError> {
                let items = expect_tuple(json, $arity, concat!($arity, "-tuple"))?;
                Ok(($($name::from_json(&items[$idx]).map_err(|e| e.within($idx))?,)+))
            }
        }
    };
}

impl_tuple!(1; A 0);
impl_tuple!(2; A 0, B 1);
impl_tuple!(3; A 0, B 1, C 2);
impl_tuple!(4; A 0, B 1, C 2, D 3);
impl_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
