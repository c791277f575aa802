// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::ast::RtTypeName;
use crate::config::EmitConfig;
use crate::element::InterfaceSpec;
use crate::infer::{InferResult, SupportsInferring};
use crate::native::NativeType;
use crate::resolver::TypeResolver;

/// Resolve the emitted type of `element`.
///
/// A configured inferer is authoritative; without one the resolver's default
/// mapping of `native` is used.
pub fn resolve_type<E: SupportsInferring>(
    element: &E,
    native: &NativeType,
    resolver: &TypeResolver,
) -> InferResult<RtTypeName> {
    match element.inferred_type(resolver)? {
        Some(overridden) => {
            log::debug!("[emit] inferer override for {}: {}", native, overridden);
            Ok(overridden)
        }
        None => Ok(resolver.resolve(native)),
    }
}

/// Emit a TypeScript interface declaration with default settings.
pub fn emit_interface(spec: &InterfaceSpec, resolver: &TypeResolver) -> InferResult<String> {
    emit_interface_with(spec, resolver, &EmitConfig::default())
}

/// Emit a TypeScript interface declaration.
///
/// The first failing inferer aborts emission and its error is returned.
pub fn emit_interface_with(
    spec: &InterfaceSpec,
    resolver: &TypeResolver,
    config: &EmitConfig,
) -> InferResult<String> {
    let pad = " ".repeat(config.indent);
    let depth = usize::from(!spec.namespace.is_empty());
    let outer = pad.repeat(depth);
    let inner = pad.repeat(depth + 1);

    let mut out = String::new();
    if depth > 0 {
        out.push_str(&format!(
            "export namespace {} {{\n",
            spec.namespace.join(".")
        ));
    }
    out.push_str(&format!("{outer}export interface {} {{\n", spec.name));

    for member in &spec.members {
        let ty = resolve_type(member, &member.ty, resolver)?;
        out.push_str(&format!(
            "{inner}{}: {ty};\n",
            display_name(&member.name, config)
        ));
    }

    for method in &spec.methods {
        let params = method
            .parameters
            .iter()
            .map(|p| -> InferResult<String> {
                let ty = resolve_type(p, &p.ty, resolver)?;
                Ok(format!("{}: {ty}", display_name(&p.name, config)))
            })
            .collect::<InferResult<Vec<_>>>()?;
        let returns = resolve_type(method, &method.returns, resolver)?;
        out.push_str(&format!(
            "{inner}{}({}): {returns};\n",
            display_name(&method.name, config),
            params.join(", ")
        ));
    }

    out.push_str(&format!("{outer}}}\n"));
    if depth > 0 {
        out.push_str("}\n");
    }

    log::debug!(
        "[emit] {} ({} members, {} methods)",
        spec.fully_qualified_name(),
        spec.members.len(),
        spec.methods.len()
    );
    Ok(out)
}

fn display_name(name: &str, config: &EmitConfig) -> String {
    if config.camel_case {
        to_camel_case(name)
    } else {
        name.to_string()
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
