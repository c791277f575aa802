// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typings - TypeScript declarations with per-member type overrides
//!
//! Exported declarations (members, method parameters, method return types)
//! normally get their TypeScript type from the [`TypeResolver`]'s structural
//! mapping. Any of them can instead carry an inline inferer that computes
//! the type name itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use typings::{
//!     emit_interface, InferTypeExt, InterfaceSpec, MemberSpec, NativeType, RtTypeName,
//!     TypeResolver,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = InterfaceSpec::new(vec!["shop".into()], "Order").with_members(vec![
//!     MemberSpec::new("id", NativeType::parse("u64")?)
//!         .infer_type_name(|_: &MemberSpec| Ok("OrderId".to_string())),
//!     MemberSpec::new("lines", NativeType::parse("Vec<shop::Line>")?)
//!         .infer_type_with(|m: &MemberSpec, resolver| {
//!             Ok(RtTypeName::generic("ReadonlyArray", vec![resolver.resolve(&m.ty)]))
//!         }),
//!     MemberSpec::new("note", NativeType::parse("Option<String>")?),
//! ]);
//!
//! let code = emit_interface(&spec, &TypeResolver::new())?;
//! assert!(code.contains("id: OrderId;"));
//! assert!(code.contains("lines: ReadonlyArray<Line[]>;"));
//! assert!(code.contains("note: string | null;"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeInferers`] | Per-element slot holding at most one inferer |
//! | [`Inferer`] | The four inferer shapes (name/type, with/without resolver) |
//! | [`InferTypeExt`] | Fluent setters available on every inferrable element |
//! | [`TypeResolver`] | Default native-to-TypeScript mapping |
//! | [`RtTypeName`] | Structured TypeScript type name |

pub mod ast;
pub mod config;
pub mod element;
pub mod emit;
pub mod infer;
pub mod native;
pub mod resolver;

pub use ast::RtTypeName;
pub use config::{ConfigError, EmitConfig, OptionalStyle, ResolverConfig, TypingsConfig};
pub use element::{InterfaceSpec, MemberSpec, MethodSpec, ParameterSpec};
pub use emit::{emit_interface, emit_interface_with, resolve_type};
pub use infer::{
    InferError, InferResult, InferTypeExt, Inferer, InfererKind, SupportsInferring,
    TypeInferers,
};
pub use native::{NativeType, ParseError, PrimitiveKind};
pub use resolver::TypeResolver;
