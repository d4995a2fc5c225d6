// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! RootBeer Native Root Detection - Rust Implementation
//!
//! Three independent indicator probes called from the Kotlin data source:
//! su binaries on disk, data directories of root management apps, and
//! system state that a stock build never has (writable `/system`,
//! `test-keys` build tag, debuggable build).
//!
//! Every probe is a heuristic. `false` means no evidence was found, not that
//! the device is unmodified. Combining the results is the caller's job.

use once_cell::sync::Lazy;

pub mod config;
pub mod ffi;
pub mod indicators;
pub mod probes;
pub mod props;
pub mod report;

pub use config::{ConfigError, ProbeConfig, PropertyMarker};
pub use probes::Indicator;
pub use props::{PropertySource, StaticProperties, SystemProperties};
pub use report::{ProbeFinding, ProbeReport};

static DEFAULT_CONFIG: Lazy<ProbeConfig> = Lazy::new(ProbeConfig::default);

/// True if any known su binary location can be opened for reading
pub fn probe_su_binary() -> bool {
    probes::find_su_binary(&DEFAULT_CONFIG).is_some()
}

/// True if any known root management app data path exists
pub fn probe_root_management_apps() -> bool {
    probes::find_root_app_data(&DEFAULT_CONFIG).is_some()
}

/// True if `/system` is writable, the build carries `test-keys`, or the
/// build is debuggable
pub fn probe_dangerous_state() -> bool {
    let props = SystemProperties::for_config(&DEFAULT_CONFIG);
    probes::find_dangerous_state(&DEFAULT_CONFIG, &props).is_some()
}
