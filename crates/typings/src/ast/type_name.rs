// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structured type names of the generated declaration language.

use std::fmt;

/// A type reference as it appears in emitted TypeScript.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RtTypeName {
    /// Named type, optionally with generic arguments (`Foo`, `Map<K, V>`).
    Simple {
        name: String,
        generics: Vec<RtTypeName>,
    },
    /// Array of the element type (`T[]`).
    Array(Box<RtTypeName>),
    /// Fixed tuple (`[A, B]`).
    Tuple(Vec<RtTypeName>),
    /// Index signature object (`{ [key: K]: V }`).
    Dictionary {
        key: Box<RtTypeName>,
        value: Box<RtTypeName>,
    },
    /// Union of alternatives (`A | B`).
    Union(Vec<RtTypeName>),
}

impl RtTypeName {
    /// Simple/named type taken verbatim from a string.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple {
            name: name.into(),
            generics: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, generics: Vec<RtTypeName>) -> Self {
        Self::Simple {
            name: name.into(),
            generics,
        }
    }

    pub fn array(element: RtTypeName) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn tuple(elements: Vec<RtTypeName>) -> Self {
        Self::Tuple(elements)
    }

    pub fn dictionary(key: RtTypeName, value: RtTypeName) -> Self {
        Self::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn union(variants: Vec<RtTypeName>) -> Self {
        Self::Union(variants)
    }

    /// `inner | null`
    pub fn nullable(inner: RtTypeName) -> Self {
        Self::Union(vec![inner, Self::simple("null")])
    }

    /// Name of a `Simple` node, `None` for composite nodes.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Self::Simple { name, .. } => Some(name),
            _ => None,
        }
    }

    fn needs_parens_as_element(&self) -> bool {
        match self {
            Self::Union(variants) => variants.len() > 1,
            Self::Dictionary { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for RtTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { name, generics } => {
                f.write_str(name)?;
                if !generics.is_empty() {
                    f.write_str("<")?;
                    write_joined(f, generics, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Array(element) => {
                if element.needs_parens_as_element() {
                    write!(f, "({element})[]")
                } else {
                    write!(f, "{element}[]")
                }
            }
            Self::Tuple(elements) => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")
            }
            Self::Dictionary { key, value } => write!(f, "{{ [key: {key}]: {value} }}"),
            Self::Union(variants) => write_joined(f, variants, " | "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[RtTypeName], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<&str> for RtTypeName {
    fn from(name: &str) -> Self {
        Self::simple(name)
    }
}

impl From<String> for RtTypeName {
    fn from(name: String) -> Self {
        Self::simple(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_simple_and_generic() {
        assert_eq!(RtTypeName::simple("Widget").to_string(), "Widget");
        let promise = RtTypeName::generic("Promise", vec![RtTypeName::simple("number")]);
        assert_eq!(promise.to_string(), "Promise<number>");
    }

    #[test]
    fn test_display_array_of_union_is_parenthesised() {
        let ty = RtTypeName::array(RtTypeName::nullable(RtTypeName::simple("string")));
        assert_eq!(ty.to_string(), "(string | null)[]");
    }

    #[test]
    fn test_display_array_of_dictionary_is_parenthesised() {
        let ty = RtTypeName::array(RtTypeName::dictionary("string".into(), "number".into()));
        assert_eq!(ty.to_string(), "({ [key: string]: number })[]");

        let single = RtTypeName::array(RtTypeName::union(vec!["Foo".into()]));
        assert_eq!(single.to_string(), "Foo[]");
    }

    #[test]
    fn test_display_tuple_and_dictionary() {
        let tuple = RtTypeName::tuple(vec!["number".into(), "string".into()]);
        assert_eq!(tuple.to_string(), "[number, string]");

        let dict = RtTypeName::dictionary("string".into(), RtTypeName::array("number".into()));
        assert_eq!(dict.to_string(), "{ [key: string]: number[] }");

        let either = RtTypeName::union(vec!["Circle".into(), "Square".into()]);
        assert_eq!(either.to_string(), "Circle | Square");
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(RtTypeName::simple("Foo").simple_name(), Some("Foo"));
        assert_eq!(RtTypeName::array("Foo".into()).simple_name(), None);
    }
}
