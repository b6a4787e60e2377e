// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Textual type resolver.
//!
//! Maps a declared type expression such as `Option<Vec<(u32, Bytes32)>>` to
//! its [`TypeNode`]. Only the closed set of codec shapes resolves; anything
//! else is rejected here, before a record using it can exist.
//!
//! # Grammar
//!
//! ```text
//! type  := name | name '<' type '>' | 'Bytes' '<' N '>' | '(' type (',' type)* ','? ')'
//! name  := u8 | u16 | u32 | u64 | u128 | bool | String | Bytes | BytesN
//!        | Option | Vec | <record name> | <custom name>
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::dynamic::{CustomCodec, RecordSchema, TypeNode, UIntWidth};
use crate::error::{SchemaError, SchemaErrorKind};
use crate::registry;

/// Where record and custom names are looked up.
pub trait Scope {
    fn record(&self, name: &str) -> Option<Arc<RecordSchema>>;
    fn custom(&self, name: &str) -> Option<CustomCodec>;
}

/// The process-wide registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalScope;

impl Scope for GlobalScope {
    fn record(&self, name: &str) -> Option<Arc<RecordSchema>> {
        registry::lookup(name)
    }

    fn custom(&self, name: &str) -> Option<CustomCodec> {
        registry::custom(name)
    }
}

/// Map-backed scope layered over the registry.
///
/// Local names shadow registered ones.
#[derive(Debug, Default)]
pub struct LocalScope {
    records: HashMap<String, Arc<RecordSchema>>,
    customs: HashMap<String, CustomCodec>,
}

impl LocalScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&mut self, schema: Arc<RecordSchema>) {
        self.records.insert(schema.name().to_string(), schema);
    }

    pub fn insert_custom(&mut self, codec: CustomCodec) {
        self.customs.insert(codec.name.to_string(), codec);
    }

    pub fn records(&self) -> impl Iterator<Item = &Arc<RecordSchema>> {
        self.records.values()
    }
}

impl Scope for LocalScope {
    fn record(&self, name: &str) -> Option<Arc<RecordSchema>> {
        self.records.get(name).cloned().or_else(|| registry::lookup(name))
    }

    fn custom(&self, name: &str) -> Option<CustomCodec> {
        self.customs.get(name).copied().or_else(|| registry::custom(name))
    }
}

/// Resolver with a per-scope memo of resolved expressions.
#[derive(Debug)]
pub struct Resolver<S> {
    scope: S,
    cache: HashMap<String, TypeNode>,
}

impl<S: Scope> Resolver<S> {
    pub fn new(scope: S) -> Self {
        Self {
            scope,
            cache: HashMap::new(),
        }
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Names can only be added to a scope, so cached resolutions stay valid.
    pub fn scope_mut(&mut self) -> &mut S {
        &mut self.scope
    }

    pub fn resolve(&mut self, decl: &str) -> Result<TypeNode, SchemaError> {
        let key = decl.trim();
        if let Some(hit) = self.cache.get(key) {
            return Ok(hit.clone());
        }
        let node = resolve(key, &self.scope)?;
        self.cache.insert(key.to_string(), node.clone());
        Ok(node)
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn into_scope(self) -> S {
        self.scope
    }
}

/// Resolve one type expression against `scope`.
pub fn resolve(decl: &str, scope: &impl Scope) -> Result<TypeNode, SchemaError> {
    let tokens = tokenize(decl)?;
    let mut parser = Parser {
        decl,
        tokens,
        pos: 0,
        scope,
    };
    let node = parser.parse_type()?;
    if let Some(token) = parser.peek() {
        return Err(parser.malformed(format!("unexpected `{token}` after type")));
    }
    node.check_shape()?;
    Ok(node)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Number(String),
    Punct(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ident(s) | Self::Number(s) => f.write_str(s),
            Self::Punct(c) => write!(f, "{c}"),
        }
    }
}

fn tokenize(decl: &str) -> Result<Vec<Token>, SchemaError> {
    let mut tokens = Vec::new();
    let mut chars = decl.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_ascii_alphabetic() || c == '_' || c.is_ascii_digit() {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    end = i + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let word = decl[start..end].to_string();
            if c.is_ascii_digit() {
                tokens.push(Token::Number(word));
            } else {
                tokens.push(Token::Ident(word));
            }
            continue;
        }
        match c {
            '<' | '>' | '(' | ')' | ',' | '[' | ']' | ';' | ':' => tokens.push(Token::Punct(c)),
            other => {
                return Err(SchemaErrorKind::MalformedType {
                    declared: decl.to_string(),
                    reason: format!("unexpected character `{other}`"),
                }
                .into())
            }
        }
    }
    Ok(tokens)
}

/// Names with no canonical encoding, and why.
fn unsupported_reason(name: &str) -> Option<&'static str> {
    let reason = match name {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => "signed integers are not supported",
        "usize" => "platform-sized integers have no fixed width",
        "f32" | "f64" | "float" => "floating point is not supported",
        "int" | "BigInt" | "BigUint" => "arbitrary-precision integers are not supported",
        "char" => "use String for text",
        "HashMap" | "BTreeMap" | "HashSet" | "BTreeSet" | "Dict" | "dict" | "Map" | "Set" => {
            "mapping and set types are not supported"
        }
        "Union" | "Result" | "Either" => "only Option is supported as a union",
        "Box" | "Rc" | "Arc" => "indirection is not resolved by the codec",
        _ => return None,
    };
    Some(reason)
}

struct Parser<'a, S> {
    decl: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    scope: &'a S,
}

impl<S: Scope> Parser<'_, S> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn malformed(&self, reason: impl Into<String>) -> SchemaError {
        SchemaErrorKind::MalformedType {
            declared: self.decl.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    fn eat(&mut self, punct: char) -> bool {
        if self.peek() == Some(&Token::Punct(punct)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: char) -> Result<(), SchemaError> {
        match self.next() {
            Some(Token::Punct(c)) if c == punct => Ok(()),
            Some(other) => Err(self.malformed(format!("expected `{punct}`, found `{other}`"))),
            None => Err(self.malformed(format!("expected `{punct}`, found end of input"))),
        }
    }

    fn parse_type(&mut self) -> Result<TypeNode, SchemaError> {
        match self.next() {
            Some(Token::Ident(name)) => self.parse_named(&name),
            Some(Token::Punct('(')) => self.parse_tuple(),
            Some(Token::Punct('[')) => Err(SchemaErrorKind::UnsupportedType {
                declared: self.decl.to_string(),
                reason: "raw arrays are not supported, use BytesN",
            }
            .into()),
            Some(other) => Err(self.malformed(format!("unexpected `{other}`"))),
            None => Err(self.malformed("empty type expression")),
        }
    }

    fn parse_generic_arg(&mut self, name: &str) -> Result<TypeNode, SchemaError> {
        if !self.eat('<') {
            return Err(self.malformed(format!("{name} needs a type argument")));
        }
        let inner = self.parse_type()?;
        if self.peek() == Some(&Token::Punct(',')) {
            return Err(self.malformed(format!("{name} takes exactly one type argument")));
        }
        self.expect('>')?;
        Ok(inner)
    }

    fn parse_named(&mut self, name: &str) -> Result<TypeNode, SchemaError> {
        let width = name
            .strip_prefix('u')
            .and_then(|bits| bits.parse::<u32>().ok())
            .and_then(UIntWidth::from_bits);
        if let Some(width) = width {
            return Ok(TypeNode::UInt(width));
        }
        match name {
            "bool" => return Ok(TypeNode::Bool),
            "String" | "str" => return Ok(TypeNode::Str),
            "Option" => return Ok(TypeNode::optional(self.parse_generic_arg(name)?)),
            "Vec" => return Ok(TypeNode::list(self.parse_generic_arg(name)?)),
            "Bytes" => {
                if !self.eat('<') {
                    return Ok(TypeNode::Bytes);
                }
                let len = match self.next() {
                    Some(Token::Number(digits)) => digits
                        .parse::<usize>()
                        .map_err(|_| self.malformed(format!("invalid length `{digits}`")))?,
                    _ => return Err(self.malformed("Bytes<N> needs a numeric length")),
                };
                self.expect('>')?;
                return Ok(TypeNode::FixedBytes(len));
            }
            _ => {}
        }
        if let Some(len) = name
            .strip_prefix("Bytes")
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
        {
            return Ok(TypeNode::FixedBytes(len));
        }
        if let Some(reason) = unsupported_reason(name) {
            return Err(SchemaErrorKind::UnsupportedType {
                declared: name.to_string(),
                reason,
            }
            .into());
        }
        if let Some(schema) = self.scope.record(name) {
            return Ok(TypeNode::Record(schema));
        }
        if let Some(codec) = self.scope.custom(name) {
            return Ok(TypeNode::Custom(codec));
        }
        Err(SchemaErrorKind::UnknownType(name.to_string()).into())
    }

    fn parse_tuple(&mut self) -> Result<TypeNode, SchemaError> {
        if self.eat(')') {
            return Err(self.malformed("empty tuple"));
        }
        let mut items = vec![self.parse_type()?];
        let mut trailing_comma = false;
        loop {
            if self.eat(')') {
                break;
            }
            self.expect(',')?;
            trailing_comma = true;
            if self.eat(')') {
                break;
            }
            items.push(self.parse_type()?);
            trailing_comma = false;
        }
        // `(T)` is just `T`, as in Rust.
        if items.len() == 1 && !trailing_comma {
            return Ok(items.remove(0));
        }
        Ok(TypeNode::Tuple(items))
    }
}
