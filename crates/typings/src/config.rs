// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Configuration file support.
//!
//! ```toml
//! [resolver]
//! strip_namespaces = true
//! optional_style = "union"
//!
//! [resolver.substitutions]
//! "chrono::DateTime" = "Date"
//! u64 = "bigint"
//!
//! [emit]
//! indent = 2
//! camel_case = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypingsConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub emit: EmitConfig,
}

impl TypingsConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate()?;
        self.emit.validate()
    }
}

impl FromStr for TypingsConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// How `Option<T>` is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalStyle {
    /// `T | null`
    #[default]
    Union,
    /// `T`
    Bare,
}

/// Default type mapping rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Emit `Point` instead of `geometry.Point`.
    #[serde(default = "default_true")]
    pub strip_namespaces: bool,

    #[serde(default)]
    pub optional_style: OptionalStyle,

    /// Native type path (or last segment, or primitive) to TypeScript type.
    #[serde(default)]
    pub substitutions: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    4
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strip_namespaces: true,
            optional_style: OptionalStyle::Union,
            substitutions: BTreeMap::new(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (from, to) in &self.substitutions {
            if from.trim().is_empty() {
                return Err(ConfigError::Invalid("substitution with empty source".into()));
            }
            if from.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "substitution source `{}` contains whitespace",
                    from
                )));
            }
            if to.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "substitution for `{}` has empty target",
                    from
                )));
            }
        }
        Ok(())
    }
}

/// Declaration output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Spaces per nesting level.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Convert `snake_case` member names to `camelCase`.
    #[serde(default)]
    pub camel_case: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            camel_case: false,
        }
    }
}

impl EmitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent == 0 || self.indent > 8 {
            return Err(ConfigError::Invalid(format!(
                "indent must be between 1 and 8, got {}",
                self.indent
            )));
        }
        Ok(())
    }
}
