// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for native type parsing and default resolution
//!
//! - `NativeType::parse`: arbitrary UTF-8 input (must not panic)
//! - `TypeResolver::resolve`: every successfully parsed type (must not panic)
//! - `Display` output of a parsed type must parse back to the same type

#![no_main]

use libfuzzer_sys::fuzz_target;
use typings::{NativeType, TypeResolver};

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(ty) = NativeType::parse(src) else {
        return;
    };

    let _ = TypeResolver::new().resolve(&ty).to_string();

    let printed = ty.to_string();
    let reparsed = NativeType::parse(&printed).expect("printed type must parse");
    assert_eq!(reparsed, ty);
});
