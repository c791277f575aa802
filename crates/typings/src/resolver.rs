// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Default mapping from native types to TypeScript type names.

use std::collections::HashMap;

use crate::ast::RtTypeName;
use crate::config::{OptionalStyle, ResolverConfig};
use crate::native::{NativeType, PrimitiveKind};

/// Type resolver service.
///
/// Maps [`NativeType`]s to [`RtTypeName`]s using structural rules plus
/// user substitutions. Substitutions are looked up by full path first, then
/// by the last path segment; primitives are keyed by their Rust spelling,
/// with `str` accepted as an alias of `String`.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    substitutions: HashMap<String, RtTypeName>,
    strip_namespaces: bool,
    optional_style: OptionalStyle,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self {
            substitutions: HashMap::new(),
            strip_namespaces: true,
            optional_style: OptionalStyle::Union,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        let mut resolver = Self::new()
            .with_strip_namespaces(config.strip_namespaces)
            .with_optional_style(config.optional_style);
        for (from, to) in &config.substitutions {
            resolver.substitute(from.clone(), RtTypeName::simple(to.trim()));
        }
        log::debug!(
            "[resolver] configured with {} substitution(s)",
            resolver.substitutions.len()
        );
        resolver
    }

    #[must_use]
    pub fn with_substitution(mut self, path: impl Into<String>, target: RtTypeName) -> Self {
        self.substitute(path, target);
        self
    }

    #[must_use]
    pub fn with_strip_namespaces(mut self, strip: bool) -> Self {
        self.strip_namespaces = strip;
        self
    }

    #[must_use]
    pub fn with_optional_style(mut self, style: OptionalStyle) -> Self {
        self.optional_style = style;
        self
    }

    pub fn substitute(&mut self, path: impl Into<String>, target: RtTypeName) {
        self.substitutions.insert(path.into(), target);
    }

    pub fn substitution(&self, path: &str) -> Option<&RtTypeName> {
        self.substitutions
            .get(path)
            .or_else(|| self.substitutions.get(last_segment(path)))
    }

    /// Resolve `ty` under the default rules.
    pub fn resolve(&self, ty: &NativeType) -> RtTypeName {
        match ty {
            NativeType::Primitive(kind) => self
                .primitive_substitution(*kind)
                .cloned()
                .unwrap_or_else(|| RtTypeName::simple(kind.ts_name())),
            NativeType::Sequence(element) | NativeType::Array { element, .. } => {
                RtTypeName::array(self.resolve(element))
            }
            NativeType::Map { key, value } => {
                RtTypeName::dictionary(self.resolve(key), self.resolve(value))
            }
            NativeType::Optional(inner) => match self.optional_style {
                OptionalStyle::Union => RtTypeName::nullable(self.resolve(inner)),
                OptionalStyle::Bare => self.resolve(inner),
            },
            NativeType::Tuple(items) => {
                RtTypeName::tuple(items.iter().map(|item| self.resolve(item)).collect())
            }
            NativeType::Named { path, generics } => self.resolve_named(path, generics),
        }
    }

    fn primitive_substitution(&self, kind: PrimitiveKind) -> Option<&RtTypeName> {
        self.substitutions.get(kind.rust_name()).or_else(|| match kind {
            // `&str` and `String` share one kind
            PrimitiveKind::Str => self.substitutions.get("str"),
            _ => None,
        })
    }

    fn resolve_named(&self, path: &str, generics: &[NativeType]) -> RtTypeName {
        if let Some(target) = self.substitution(path) {
            log::trace!("[resolver] substituted {} -> {}", path, target);
            return target.clone();
        }

        let name = if self.strip_namespaces {
            last_segment(path).to_string()
        } else {
            path.replace("::", ".")
        };
        RtTypeName::generic(name, generics.iter().map(|g| self.resolve(g)).collect())
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
