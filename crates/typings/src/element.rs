// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Exportable declarations.
//!
//! Members, parameters and methods each own an inferer slot, so their emitted
//! type can be overridden one by one.

use crate::infer::{SupportsInferring, TypeInferers};
use crate::native::NativeType;

/// Interface to be emitted.
#[derive(Debug)]
pub struct InterfaceSpec {
    pub namespace: Vec<String>,
    pub name: String,
    pub members: Vec<MemberSpec>,
    pub methods: Vec<MethodSpec>,
}

impl InterfaceSpec {
    pub fn new(namespace: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            members: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_members(mut self, members: Vec<MemberSpec>) -> Self {
        self.members = members;
        self
    }

    #[must_use]
    pub fn with_methods(mut self, methods: Vec<MethodSpec>) -> Self {
        self.methods = methods;
        self
    }

    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace.join("."), self.name)
        }
    }
}

/// Field or property.
#[derive(Debug)]
pub struct MemberSpec {
    pub name: String,
    pub ty: NativeType,
    inferers: TypeInferers<MemberSpec>,
}

impl MemberSpec {
    pub fn new(name: impl Into<String>, ty: NativeType) -> Self {
        Self {
            name: name.into(),
            ty,
            inferers: TypeInferers::new(),
        }
    }
}

impl SupportsInferring for MemberSpec {
    fn type_inferers(&self) -> &TypeInferers<Self> {
        &self.inferers
    }

    fn type_inferers_mut(&mut self) -> &mut TypeInferers<Self> {
        &mut self.inferers
    }
}

/// Method parameter.
#[derive(Debug)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: NativeType,
    inferers: TypeInferers<ParameterSpec>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: NativeType) -> Self {
        Self {
            name: name.into(),
            ty,
            inferers: TypeInferers::new(),
        }
    }
}

impl SupportsInferring for ParameterSpec {
    fn type_inferers(&self) -> &TypeInferers<Self> {
        &self.inferers
    }

    fn type_inferers_mut(&mut self) -> &mut TypeInferers<Self> {
        &mut self.inferers
    }
}

/// Method signature. Its own slot overrides the return type.
#[derive(Debug)]
pub struct MethodSpec {
    pub name: String,
    pub parameters: Vec<ParameterSpec>,
    pub returns: NativeType,
    inferers: TypeInferers<MethodSpec>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>, returns: NativeType) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            returns,
            inferers: TypeInferers::new(),
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterSpec>) -> Self {
        self.parameters = parameters;
        self
    }
}

impl SupportsInferring for MethodSpec {
    fn type_inferers(&self) -> &TypeInferers<Self> {
        &self.inferers
    }

    fn type_inferers_mut(&mut self) -> &mut TypeInferers<Self> {
        &mut self.inferers
    }
}
