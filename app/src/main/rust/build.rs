// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

// Build script for the native root indicator probes

fn main() {
    // Tell Cargo to link against log on Android
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("android") {
        println!("cargo:rustc-link-lib=log");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
