// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Inline type inferers.
//!
//! Every inferrable element (member, parameter, method return) owns one
//! [`TypeInferers`] slot. The slot holds at most one [`Inferer`]; installing
//! a new one discards whatever was there before, whatever its kind.
//!
//! ```
//! use typings::{
//!     InferTypeExt, MemberSpec, NativeType, RtTypeName, SupportsInferring, TypeResolver,
//! };
//!
//! let member = MemberSpec::new("id", NativeType::parse("u64").unwrap())
//!     .infer_type_name(|m: &MemberSpec| Ok(format!("{}Id", m.name)));
//!
//! let resolved = member.inferred_type(&TypeResolver::new()).unwrap();
//! assert_eq!(resolved, Some(RtTypeName::simple("idId")));
//! ```

use std::fmt;

use thiserror::Error;

use crate::ast::RtTypeName;
use crate::resolver::TypeResolver;

/// Errors raised by user-supplied inferers.
#[derive(Debug, Error)]
pub enum InferError {
    #[error("cannot infer type of `{element}`: {reason}")]
    Rejected { element: String, reason: String },

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl InferError {
    pub fn rejected(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

pub type InferResult<T> = Result<T, InferError>;

type WithResolverFn<T, R> = Box<dyn Fn(&T, &TypeResolver) -> InferResult<R>>;
type PlainFn<T, R> = Box<dyn Fn(&T) -> InferResult<R>>;

/// One of the four inferer shapes a slot may hold.
pub enum Inferer<T> {
    /// `(element, resolver) -> "TypeName"`
    NameWithResolver(WithResolverFn<T, String>),
    /// `(element, resolver) -> RtTypeName`
    TypeWithResolver(WithResolverFn<T, RtTypeName>),
    /// `element -> "TypeName"`
    Name(PlainFn<T, String>),
    /// `element -> RtTypeName`
    Type(PlainFn<T, RtTypeName>),
}

impl<T> Inferer<T> {
    pub fn name_with_resolver<F>(f: F) -> Self
    where
        F: Fn(&T, &TypeResolver) -> InferResult<String> + 'static,
    {
        Self::NameWithResolver(Box::new(f))
    }

    pub fn type_with_resolver<F>(f: F) -> Self
    where
        F: Fn(&T, &TypeResolver) -> InferResult<RtTypeName> + 'static,
    {
        Self::TypeWithResolver(Box::new(f))
    }

    pub fn name<F>(f: F) -> Self
    where
        F: Fn(&T) -> InferResult<String> + 'static,
    {
        Self::Name(Box::new(f))
    }

    pub fn type_name<F>(f: F) -> Self
    where
        F: Fn(&T) -> InferResult<RtTypeName> + 'static,
    {
        Self::Type(Box::new(f))
    }

    pub fn kind(&self) -> InfererKind {
        match self {
            Self::NameWithResolver(_) => InfererKind::NameWithResolver,
            Self::TypeWithResolver(_) => InfererKind::TypeWithResolver,
            Self::Name(_) => InfererKind::Name,
            Self::Type(_) => InfererKind::Type,
        }
    }

    /// Run the callback. String results become simple type names, structured
    /// results are returned as-is.
    fn invoke(&self, src: &T, resolver: &TypeResolver) -> InferResult<RtTypeName> {
        match self {
            Self::NameWithResolver(f) => f(src, resolver).map(|name| RtTypeName::simple(name)),
            Self::TypeWithResolver(f) => f(src, resolver),
            Self::Name(f) => f(src).map(|name| RtTypeName::simple(name)),
            Self::Type(f) => f(src),
        }
    }
}

impl<T> fmt::Debug for Inferer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Inferer").field(&self.kind()).finish()
    }
}

/// Discriminant of [`Inferer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfererKind {
    NameWithResolver,
    TypeWithResolver,
    Name,
    Type,
}

impl InfererKind {
    pub fn uses_resolver(self) -> bool {
        matches!(self, Self::NameWithResolver | Self::TypeWithResolver)
    }
}

impl fmt::Display for InfererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NameWithResolver => "name-with-resolver",
            Self::TypeWithResolver => "type-with-resolver",
            Self::Name => "name",
            Self::Type => "type",
        };
        f.write_str(label)
    }
}

/// Per-element slot holding zero or one inferer.
pub struct TypeInferers<T> {
    active: Option<Inferer<T>>,
}

impl<T> TypeInferers<T> {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Install `inferer`, dropping the previously active one.
    pub fn set(&mut self, inferer: Inferer<T>) {
        let kind = inferer.kind();
        if let Some(previous) = self.active.replace(inferer) {
            log::trace!("[infer] replaced {} inferer with {}", previous.kind(), kind);
        } else {
            log::trace!("[infer] installed {} inferer", kind);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    pub fn active_kind(&self) -> Option<InfererKind> {
        self.active.as_ref().map(Inferer::kind)
    }

    /// Compute the overriding type name for `src`.
    ///
    /// `Ok(None)` means nothing is configured and the caller should fall back
    /// to its default mapping. Callback errors are returned untouched.
    pub fn infer(&self, src: &T, resolver: &TypeResolver) -> InferResult<Option<RtTypeName>> {
        let Some(inferer) = &self.active else {
            return Ok(None);
        };
        inferer.invoke(src, resolver).map(Some)
    }
}

impl<T> Default for TypeInferers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypeInferers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInferers")
            .field("active", &self.active_kind())
            .finish()
    }
}

/// Element that owns a [`TypeInferers`] slot for itself.
pub trait SupportsInferring: Sized {
    fn type_inferers(&self) -> &TypeInferers<Self>;

    fn type_inferers_mut(&mut self) -> &mut TypeInferers<Self>;

    /// Run this element's own slot against itself.
    fn inferred_type(&self, resolver: &TypeResolver) -> InferResult<Option<RtTypeName>> {
        self.type_inferers().infer(self, resolver)
    }
}

/// Fluent configuration of an element's inferer.
pub trait InferTypeExt: SupportsInferring {
    /// Override the type with a name computed from the element and resolver.
    #[must_use]
    fn infer_type_name_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self, &TypeResolver) -> InferResult<String> + 'static,
    {
        self.type_inferers_mut().set(Inferer::name_with_resolver(f));
        self
    }

    /// Override the type with a structured name computed from the element and resolver.
    #[must_use]
    fn infer_type_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self, &TypeResolver) -> InferResult<RtTypeName> + 'static,
    {
        self.type_inferers_mut().set(Inferer::type_with_resolver(f));
        self
    }

    /// Override the type with a name computed from the element.
    #[must_use]
    fn infer_type_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self) -> InferResult<String> + 'static,
    {
        self.type_inferers_mut().set(Inferer::name(f));
        self
    }

    /// Override the type with a structured name computed from the element.
    #[must_use]
    fn infer_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&Self) -> InferResult<RtTypeName> + 'static,
    {
        self.type_inferers_mut().set(Inferer::type_name(f));
        self
    }
}

impl<E: SupportsInferring> InferTypeExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Field {
        name: &'static str,
        inferers: TypeInferers<Field>,
    }

    impl Field {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                inferers: TypeInferers::new(),
            }
        }
    }

    impl SupportsInferring for Field {
        fn type_inferers(&self) -> &TypeInferers<Self> {
            &self.inferers
        }

        fn type_inferers_mut(&mut self) -> &mut TypeInferers<Self> {
            &mut self.inferers
        }
    }

    #[test]
    fn test_empty_by_default() {
        let field = Field::new("a");
        assert!(field.type_inferers().is_empty());
        assert_eq!(field.type_inferers().active_kind(), None);
        assert!(field.inferred_type(&TypeResolver::new()).unwrap().is_none());
    }

    #[test]
    fn test_string_result_is_wrapped() {
        let field = Field::new("a").infer_type_name(|_| Ok("Foo".to_string()));
        let resolved = field.inferred_type(&TypeResolver::new()).unwrap();
        assert_eq!(resolved, Some(RtTypeName::simple("Foo")));
    }

    #[test]
    fn test_structured_result_passes_through() {
        let fixed = RtTypeName::dictionary("string".into(), RtTypeName::array("Foo".into()));
        let expected = fixed.clone();
        let field = Field::new("a").infer_type_with(move |_, _| Ok(fixed.clone()));

        let resolved = field.inferred_type(&TypeResolver::new()).unwrap();
        assert_eq!(resolved, Some(expected));
    }

    #[test]
    fn test_last_write_wins_across_kinds() {
        let mut field = Field::new("a");
        field.type_inferers_mut().set(Inferer::name(|_| Ok("One".into())));
        field
            .type_inferers_mut()
            .set(Inferer::type_with_resolver(|_, _| Ok("Two".into())));
        field
            .type_inferers_mut()
            .set(Inferer::name_with_resolver(|p: &Field, _| {
                Ok(format!("Three{}", p.name))
            }));
        field
            .type_inferers_mut()
            .set(Inferer::type_name(|_| Ok(RtTypeName::array("Four".into()))));

        assert_eq!(field.type_inferers().active_kind(), Some(InfererKind::Type));
        let resolved = field.inferred_type(&TypeResolver::new()).unwrap();
        assert_eq!(resolved, Some(RtTypeName::array("Four".into())));
    }

    #[test]
    fn test_overwrite_same_kind_only_calls_second() {
        let first_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&first_calls);

        let field = Field::new("a")
            .infer_type_name(move |_| {
                counter.set(counter.get() + 1);
                Ok("First".into())
            })
            .infer_type_name(|_| Ok("Second".into()));

        let resolved = field.inferred_type(&TypeResolver::new()).unwrap();
        assert_eq!(resolved, Some(RtTypeName::simple("Second")));
        assert_eq!(first_calls.get(), 0);
    }

    #[test]
    fn test_context_aware_sees_exact_resolver() {
        let seen = Rc::new(Cell::new(0usize));
        let sink = Rc::clone(&seen);
        let field = Field::new("a").infer_type_name_with(move |_, resolver| {
            sink.set(resolver as *const TypeResolver as usize);
            Ok("Seen".into())
        });

        let resolver = TypeResolver::new().with_substitution("Uuid", "string".into());
        field.inferred_type(&resolver).unwrap();
        assert_eq!(seen.get(), &resolver as *const TypeResolver as usize);
    }

    #[test]
    fn test_overwrite_same_kind_structured_only_calls_second() {
        let first_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&first_calls);

        let field = Field::new("a")
            .infer_type_with(move |_, _| {
                counter.set(counter.get() + 1);
                Ok(RtTypeName::simple("First"))
            })
            .infer_type_with(|_, _| Ok(RtTypeName::array("Second".into())));

        assert_eq!(
            field.type_inferers().active_kind(),
            Some(InfererKind::TypeWithResolver)
        );
        let resolved = field.inferred_type(&TypeResolver::new()).unwrap();
        assert_eq!(resolved, Some(RtTypeName::array("Second".into())));
        assert_eq!(first_calls.get(), 0);
    }

    #[test]
    fn test_structured_context_aware_sees_exact_resolver() {
        let seen = Rc::new(Cell::new(0usize));
        let sink = Rc::clone(&seen);
        let field = Field::new("id").infer_type_with(move |f, resolver| {
            sink.set(resolver as *const TypeResolver as usize);
            Ok(resolver
                .substitution(f.name)
                .cloned()
                .unwrap_or_else(|| RtTypeName::simple("unknown")))
        });

        let resolver = TypeResolver::new().with_substitution("id", "OrderId".into());
        let resolved = field.inferred_type(&resolver).unwrap();
        assert_eq!(seen.get(), &resolver as *const TypeResolver as usize);
        assert_eq!(resolved, Some(RtTypeName::simple("OrderId")));

        let other = TypeResolver::new();
        let fallback = field.inferred_type(&other).unwrap();
        assert_eq!(seen.get(), &other as *const TypeResolver as usize);
        assert_eq!(fallback, Some(RtTypeName::simple("unknown")));
    }

    #[test]
    fn test_context_free_ignores_resolver() {
        let field = Field::new("widget").infer_type_name(|p| Ok(p.name.to_uppercase()));

        let plain = TypeResolver::new();
        let custom = TypeResolver::new().with_substitution("widget", "Other".into());
        let a = field.inferred_type(&plain).unwrap();
        let b = field.inferred_type(&custom).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Some(RtTypeName::simple("WIDGET")));
    }

    #[test]
    fn test_failure_propagates_and_keeps_slot() {
        let mut field =
            Field::new("broken").infer_type_name(|p| Err(InferError::rejected(p.name, "no mapping")));

        let err = field.inferred_type(&TypeResolver::new()).unwrap_err();
        match err {
            InferError::Rejected { element, reason } => {
                assert_eq!(element, "broken");
                assert_eq!(reason, "no mapping");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(field.type_inferers().active_kind(), Some(InfererKind::Name));

        field.type_inferers_mut().set(Inferer::name(|_| Ok("Fixed".into())));
        let resolved = field.inferred_type(&TypeResolver::new()).unwrap();
        assert_eq!(resolved, Some(RtTypeName::simple("Fixed")));
    }

    #[test]
    fn test_infer_does_not_consume_inferer() {
        let field = Field::new("a").infer_type(|_| Ok(RtTypeName::simple("Stable")));
        let resolver = TypeResolver::new();
        for _ in 0..3 {
            assert_eq!(
                field.inferred_type(&resolver).unwrap(),
                Some(RtTypeName::simple("Stable"))
            );
        }
    }

    #[test]
    fn test_kind_labels() {
        assert!(InfererKind::NameWithResolver.uses_resolver());
        assert!(!InfererKind::Type.uses_resolver());
        assert_eq!(InfererKind::TypeWithResolver.to_string(), "type-with-resolver");
        let inferer: Inferer<Field> = Inferer::name(|_| Ok(String::new()));
        assert_eq!(format!("{inferer:?}"), "Inferer(Name)");
    }
}
