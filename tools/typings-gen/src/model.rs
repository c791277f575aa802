// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Declaration model
//
// Describes the interfaces to export, in YAML or JSON:
//
//   interfaces:
//     - name: Order
//       namespace: shop
//       members:
//         - { name: id, type: u64 }
//       methods:
//         - { name: total, params: [{ name: currency, type: String }], returns: f64 }
//   overrides:
//     - { target: "Order\\.id", type: "OrderId" }
//
// Override targets are regexes matched against `Interface.member`,
// `Interface.method` and `Interface.method.param`. `{name}` in the type is
// replaced with the element name.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use typings::{
    InterfaceSpec, Inferer, MemberSpec, MethodSpec, NativeType, ParameterSpec, SupportsInferring,
};

/// Root of a model file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationModel {
    /// Namespace applied to interfaces that do not set their own
    #[serde(default)]
    pub namespace: Option<String>,
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default)]
    pub overrides: Vec<TypeOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<MemberDecl>,
    #[serde(default = "default_returns")]
    pub returns: String,
}

fn default_returns() -> String {
    "()".to_string()
}

/// Per-element type override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeOverride {
    pub target: String,
    #[serde(rename = "type")]
    pub ty: String,
}

struct CompiledOverride {
    pattern: Regex,
    template: String,
}

impl CompiledOverride {
    fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

impl DeclarationModel {
    /// Load a model, JSON when the extension is `.json`, YAML otherwise
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let model = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON model {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML model {}", path.display()))?
        };
        Ok(model)
    }

    /// Build interface specs and install the overrides as inline inferers
    pub fn into_specs(self) -> Result<Vec<InterfaceSpec>> {
        let overrides = self
            .overrides
            .iter()
            .map(|o| -> Result<CompiledOverride> {
                // Anchored so `Order.id` does not also hit `Order.idempotency_key`
                let pattern = Regex::new(&format!("^(?:{})$", o.target))
                    .with_context(|| format!("Invalid override target `{}`", o.target))?;
                Ok(CompiledOverride {
                    pattern,
                    template: o.ty.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let default_ns = self.namespace;
        self.interfaces
            .into_iter()
            .map(|decl| build_interface(decl, default_ns.as_deref(), &overrides))
            .collect()
    }
}

fn build_interface(
    decl: InterfaceDecl,
    default_ns: Option<&str>,
    overrides: &[CompiledOverride],
) -> Result<InterfaceSpec> {
    let namespace: Vec<String> = decl
        .namespace
        .as_deref()
        .or(default_ns)
        .map(|ns| {
            ns.split(['.', ':'])
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let iface = decl.name;

    let mut members = Vec::with_capacity(decl.members.len());
    for m in decl.members {
        let ty = parse_type(&m.ty, &format!("{iface}.{}", m.name))?;
        let mut member = MemberSpec::new(m.name, ty);
        let path = format!("{iface}.{}", member.name);
        apply_overrides(&mut member, &path, overrides, |m| m.name.as_str());
        members.push(member);
    }

    let mut methods = Vec::with_capacity(decl.methods.len());
    for md in decl.methods {
        let method_path = format!("{iface}.{}", md.name);
        let mut params = Vec::with_capacity(md.params.len());
        for p in md.params {
            let path = format!("{method_path}.{}", p.name);
            let mut param = ParameterSpec::new(p.name, parse_type(&p.ty, &path)?);
            apply_overrides(&mut param, &path, overrides, |p| p.name.as_str());
            params.push(param);
        }

        let returns = parse_type(&md.returns, &method_path)?;
        let mut method = MethodSpec::new(md.name, returns).with_parameters(params);
        apply_overrides(&mut method, &method_path, overrides, |m| m.name.as_str());
        methods.push(method);
    }

    Ok(InterfaceSpec::new(namespace, iface)
        .with_members(members)
        .with_methods(methods))
}

fn parse_type(src: &str, path: &str) -> Result<NativeType> {
    NativeType::parse(src).with_context(|| format!("Invalid type `{src}` for {path}"))
}

/// Install every matching override; the slot keeps the last one.
fn apply_overrides<E>(
    element: &mut E,
    path: &str,
    overrides: &[CompiledOverride],
    name_of: fn(&E) -> &str,
) where
    E: SupportsInferring + 'static,
{
    for o in overrides.iter().filter(|o| o.matches(path)) {
        tracing::debug!("Override {} -> {}", path, o.template);
        let template = o.template.clone();
        element
            .type_inferers_mut()
            .set(Inferer::name(move |e: &E| {
                Ok(template.replace("{name}", name_of(e)))
            }));
    }
}
