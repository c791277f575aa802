// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Source-side type model.
//!
//! Types are written in Rust syntax (`Vec<Option<geo::Point>>`, `[u8; 16]`,
//! `(i32, String)`) and parsed into [`NativeType`]. Smart pointers and
//! references are transparent: `Arc<T>` and `&T` both parse as `T`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type at offset {position}: {message}")]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Str,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Unit,
}

impl PrimitiveKind {
    // @audit-ok: Simple pattern matching - identifier to primitive lookup table
    fn from_ident(ident: &str) -> Option<Self> {
        let kind = match ident {
            "bool" => Self::Bool,
            "char" => Self::Char,
            "str" | "String" => Self::Str,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            _ => return None,
        };
        Some(kind)
    }

    /// Rust spelling, also used as the substitution key.
    pub fn rust_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Str => "String",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Unit => "()",
        }
    }

    /// Default TypeScript spelling.
    pub fn ts_name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Char | Self::Str => "string",
            Self::Unit => "void",
            _ => "number",
        }
    }
}

/// A type as declared in the source being exported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Primitive(PrimitiveKind),
    /// User type, `path` keeps its `::` separators.
    Named {
        path: String,
        generics: Vec<NativeType>,
    },
    Sequence(Box<NativeType>),
    Array {
        element: Box<NativeType>,
        len: usize,
    },
    Map {
        key: Box<NativeType>,
        value: Box<NativeType>,
    },
    Optional(Box<NativeType>),
    Tuple(Vec<NativeType>),
}

impl NativeType {
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let mut parser = Parser {
            src,
            pos: 0,
            depth: 0,
        };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos < src.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    pub fn named(path: impl Into<String>) -> Self {
        Self::Named {
            path: path.into(),
            generics: Vec::new(),
        }
    }

    pub fn sequence(element: NativeType) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn optional(inner: NativeType) -> Self {
        Self::Optional(Box::new(inner))
    }

    fn from_path(path: String, mut generics: Vec<NativeType>) -> Self {
        let last = path.rsplit("::").next().unwrap_or_default().to_owned();
        match (last.as_str(), generics.len()) {
            (ident, 0) => match PrimitiveKind::from_ident(ident) {
                Some(kind) => Self::Primitive(kind),
                None => Self::Named { path, generics },
            },
            ("Vec" | "VecDeque" | "HashSet" | "BTreeSet" | "LinkedList", 1) => {
                Self::Sequence(Box::new(generics.remove(0)))
            }
            ("Option", 1) => Self::Optional(Box::new(generics.remove(0))),
            ("Box" | "Rc" | "Arc" | "Cow", 1) => generics.remove(0),
            ("HashMap" | "BTreeMap" | "IndexMap", 2) => {
                let value = generics.remove(1);
                let key = generics.remove(0);
                Self::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                }
            }
            _ => Self::Named { path, generics },
        }
    }
}

impl FromStr for NativeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.rust_name()),
            Self::Named { path, generics } => {
                f.write_str(path)?;
                if !generics.is_empty() {
                    f.write_str("<")?;
                    for (i, g) in generics.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{g}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Sequence(element) => write!(f, "Vec<{element}>"),
            Self::Array { element, len } => write!(f, "[{element}; {len}]"),
            Self::Map { key, value } => write!(f, "HashMap<{key}, {value}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

const MAX_DEPTH: usize = 64;

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            position: self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{token}`")))
        }
    }

    fn parse_type(&mut self) -> Result<NativeType, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("type nesting too deep"));
        }
        self.depth += 1;
        let ty = self.parse_type_inner();
        self.depth -= 1;
        ty
    }

    fn parse_type_inner(&mut self) -> Result<NativeType, ParseError> {
        match self.peek() {
            Some('&') => {
                self.pos += 1;
                self.skip_lifetime();
                self.eat_keyword("mut");
                self.parse_type()
            }
            Some('(') => self.parse_tuple(),
            Some('[') => self.parse_bracketed(),
            Some(c) if c.is_alphabetic() || c == '_' || c == ':' => self.parse_path_type(),
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn skip_lifetime(&mut self) {
        if self.peek() == Some('\'') {
            self.pos += 1;
            let _ = self.ident();
        }
    }

    fn eat_keyword(&mut self, keyword: &str) {
        let save = self.pos;
        match self.ident() {
            Some(ident) if ident == keyword => {}
            _ => self.pos = save,
        }
    }

    fn parse_tuple(&mut self) -> Result<NativeType, ParseError> {
        self.expect("(")?;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while !self.eat(")") {
            items.push(self.parse_type()?);
            trailing_comma = self.eat(",");
            if !trailing_comma && self.peek() != Some(')') {
                return Err(self.error("expected `,` or `)` in tuple"));
            }
        }
        Ok(match items.len() {
            0 => NativeType::Primitive(PrimitiveKind::Unit),
            1 if !trailing_comma => items.remove(0),
            _ => NativeType::Tuple(items),
        })
    }

    fn parse_bracketed(&mut self) -> Result<NativeType, ParseError> {
        self.expect("[")?;
        let element = self.parse_type()?;
        if self.eat("]") {
            return Ok(NativeType::sequence(element));
        }
        self.expect(";")?;
        self.skip_ws();
        let digits: String = self.rest().chars().take_while(char::is_ascii_digit).collect();
        let len = digits
            .parse::<usize>()
            .map_err(|_| self.error("expected array length"))?;
        self.pos += digits.len();
        self.expect("]")?;
        Ok(NativeType::Array {
            element: Box::new(element),
            len,
        })
    }

    fn parse_path_type(&mut self) -> Result<NativeType, ParseError> {
        self.eat("::");
        let mut segments = Vec::new();
        loop {
            let segment = self
                .ident()
                .ok_or_else(|| self.error("expected identifier"))?;
            segments.push(segment);
            if !self.eat("::") {
                break;
            }
        }

        let mut generics = Vec::new();
        if self.eat("<") {
            loop {
                // Lifetime arguments carry no shape
                if self.peek() == Some('\'') {
                    self.pos += 1;
                    self.ident()
                        .ok_or_else(|| self.error("expected lifetime name"))?;
                } else {
                    generics.push(self.parse_type()?);
                }
                if self.eat(">") {
                    break;
                }
                self.expect(",")?;
                if self.eat(">") {
                    break;
                }
            }
        }

        Ok(NativeType::from_path(segments.join("::"), generics))
    }

    fn ident(&mut self) -> Option<String> {
        self.skip_ws();
        let len: usize = self
            .rest()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum();
        let first = self.rest().chars().next()?;
        if len == 0 || first.is_ascii_digit() {
            return None;
        }
        let ident = self.rest()[..len].to_string();
        self.pos += len;
        Some(ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> NativeType {
        NativeType::parse(src).unwrap()
    }

    #[test]
    fn test_parse_primitives() {
        assert_eq!(parse("u32"), NativeType::Primitive(PrimitiveKind::U32));
        assert_eq!(parse("String"), NativeType::Primitive(PrimitiveKind::Str));
        assert_eq!(parse("&'a str"), NativeType::Primitive(PrimitiveKind::Str));
        assert_eq!(parse("()"), NativeType::Primitive(PrimitiveKind::Unit));
    }

    #[test]
    fn test_parse_containers() {
        assert_eq!(
            parse("Vec<Option<geo::Point>>"),
            NativeType::sequence(NativeType::optional(NativeType::named("geo::Point")))
        );
        assert_eq!(
            parse("std::collections::HashMap<String, f64>"),
            NativeType::Map {
                key: Box::new(NativeType::Primitive(PrimitiveKind::Str)),
                value: Box::new(NativeType::Primitive(PrimitiveKind::F64)),
            }
        );
        assert_eq!(parse("Arc<Widget>"), NativeType::named("Widget"));
    }

    #[test]
    fn test_parse_arrays_and_tuples() {
        assert_eq!(
            parse("[u8; 16]"),
            NativeType::Array {
                element: Box::new(NativeType::Primitive(PrimitiveKind::U8)),
                len: 16,
            }
        );
        assert_eq!(
            parse("&[bool]"),
            NativeType::sequence(NativeType::Primitive(PrimitiveKind::Bool))
        );
        assert_eq!(
            parse("(i32, String)"),
            NativeType::Tuple(vec![
                NativeType::Primitive(PrimitiveKind::I32),
                NativeType::Primitive(PrimitiveKind::Str),
            ])
        );
        assert_eq!(parse("(i32)"), NativeType::Primitive(PrimitiveKind::I32));
    }

    #[test]
    fn test_parse_user_generic() {
        let ty = parse("Page<Order, u32>");
        assert_eq!(
            ty,
            NativeType::Named {
                path: "Page".into(),
                generics: vec![
                    NativeType::named("Order"),
                    NativeType::Primitive(PrimitiveKind::U32)
                ],
            }
        );
        assert_eq!(ty.to_string(), "Page<Order, u32>");
    }

    #[test]
    fn test_parse_skips_lifetime_arguments() {
        assert_eq!(
            parse("Cow<'a, str>"),
            NativeType::Primitive(PrimitiveKind::Str)
        );
        assert_eq!(
            parse("std::borrow::Cow<'static, [u8]>"),
            NativeType::sequence(NativeType::Primitive(PrimitiveKind::U8))
        );

        let view = parse("View<'a, Order>");
        assert_eq!(
            view,
            NativeType::Named {
                path: "View".into(),
                generics: vec![NativeType::named("Order")],
            }
        );
        assert_eq!(view.to_string(), "View<Order>");
        assert_eq!(parse("Token<'src>"), NativeType::named("Token"));

        assert!(NativeType::parse("Cow<', str>").is_err());
    }

    #[test]
    fn test_parse_errors() {
        let err = NativeType::parse("Vec<u8").unwrap_err();
        assert_eq!(err.position, 6);

        assert!(NativeType::parse("").is_err());
        assert!(NativeType::parse("u8 u16").is_err());
        assert!(NativeType::parse("[u8; x]").is_err());
        assert!("Vec<>".parse::<NativeType>().is_err());

        let deep = format!("{}u8{}", "Vec<".repeat(100), ">".repeat(100));
        assert!(NativeType::parse(&deep).is_err());
    }
}
