// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Declaration Generator
//
// Renders a `.d.ts` file from:
// - a declaration model (YAML/JSON)
// - typings.toml (resolver + emit settings)
// - the built-in declarations template

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tera::Tera;
use typings::{
    emit_interface_with, EmitConfig, InterfaceSpec, SupportsInferring, TypeResolver,
    TypingsConfig,
};

use crate::model::DeclarationModel;

const DECLARATIONS_TEMPLATE: &str = "\
// Generated by typings-gen {{ version }} on {{ generated }}
// Source: {{ source }}
// Do not edit by hand.
{% for block in blocks %}
{{ block }}{% endfor %}";

/// Generator state
pub struct Generator {
    resolver: TypeResolver,
    emit: EmitConfig,
    tera: Tera,
}

impl Generator {
    pub fn new(config: &TypingsConfig) -> Result<Self> {
        config.validate().context("Invalid typings configuration")?;

        let mut tera = Tera::default();
        tera.add_raw_template("declarations", DECLARATIONS_TEMPLATE)
            .context("Failed to parse declarations template")?;

        Ok(Self {
            resolver: TypeResolver::from_config(&config.resolver),
            emit: config.emit.clone(),
            tera,
        })
    }

    /// Load `typings.toml`, or use defaults when no path is given
    pub fn from_config_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::info!("Loading config from: {:?}", path);
                TypingsConfig::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?
            }
            None => TypingsConfig::default(),
        };
        Self::new(&config)
    }

    /// Render every interface of `model` into one declarations file
    pub fn generate(&self, model: DeclarationModel, source: &str) -> Result<Generated> {
        let specs = model.into_specs()?;
        let mut report = GenerationReport::new();

        let mut blocks = Vec::with_capacity(specs.len());
        for spec in &specs {
            let block = emit_interface_with(spec, &self.resolver, &self.emit)
                .with_context(|| format!("Failed to emit {}", spec.fully_qualified_name()))?;
            report.record(spec);
            blocks.push(block);
        }

        let mut ctx = tera::Context::new();
        ctx.insert("version", env!("CARGO_PKG_VERSION"));
        ctx.insert("generated", &chrono::Local::now().to_rfc3339());
        ctx.insert("source", source);
        ctx.insert("blocks", &blocks);

        let content = self
            .tera
            .render("declarations", &ctx)
            .context("Failed to render declarations")?;

        tracing::info!("[OK] Generated {} interfaces", report.interfaces.len());
        Ok(Generated { content, report })
    }

    /// Load a model file and write the rendered declarations to `out`
    pub fn generate_file(&self, model_path: &Path, out: &Path) -> Result<GenerationReport> {
        let model = DeclarationModel::from_file(model_path)?;
        let generated = self.generate(model, &model_path.display().to_string())?;

        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(out, &generated.content)
            .with_context(|| format!("Failed to write {}", out.display()))?;

        Ok(generated.report)
    }
}

/// Rendered output and its report
#[derive(Debug)]
pub struct Generated {
    pub content: String,
    pub report: GenerationReport,
}

/// Generation report
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub interfaces: Vec<String>,
    pub members: usize,
    pub methods: usize,
    /// Members, parameters and return types typed by an inline inferer
    pub overridden: usize,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, spec: &InterfaceSpec) {
        self.interfaces.push(spec.fully_qualified_name());
        self.members += spec.members.len();
        self.methods += spec.methods.len();
        self.overridden += spec
            .members
            .iter()
            .filter(|m| !m.type_inferers().is_empty())
            .count();
        for method in &spec.methods {
            self.overridden += usize::from(!method.type_inferers().is_empty());
            self.overridden += method
                .parameters
                .iter()
                .filter(|p| !p.type_inferers().is_empty())
                .count();
        }
    }

    pub fn summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("  Declaration Generation Report");
        println!("{}", "=".repeat(60));
        println!();
        println!("  [OK] Interfaces:      {}", self.interfaces.len());
        println!("  [OK] Members:         {}", self.members);
        println!("  [OK] Methods:         {}", self.methods);
        println!("  [OK] Overridden:      {} (inline inferers)", self.overridden);
        println!();
        for name in &self.interfaces {
            println!("    - {}", name);
        }
        println!();
        println!("{}", "=".repeat(60));
    }
}
