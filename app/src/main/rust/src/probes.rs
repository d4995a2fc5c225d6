// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Root indicator probes.
//!
//! Each probe walks its table in order and stops at the first hit. Any I/O
//! failure along the way (missing entry, permission denied, ...) counts as
//! "no indicator here" and is never reported to the caller.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::{ProbeConfig, PropertyMarker};
use crate::props::PropertySource;

/// The first piece of evidence a probe found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    SuBinary(PathBuf),
    RootAppData(PathBuf),
    WritableSystemPath(PathBuf),
    Property { name: String, value: String },
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::SuBinary(path) => write!(f, "SU binary found: {}", path.display()),
            Indicator::RootAppData(path) => {
                write!(f, "Root management app data found: {}", path.display())
            }
            Indicator::WritableSystemPath(path) => {
                write!(f, "Protected path is writable: {}", path.display())
            }
            Indicator::Property { name, value } => {
                write!(f, "Dangerous property: {}={}", name, value)
            }
        }
    }
}

/// First su binary that can be opened for reading
pub fn find_su_binary(config: &ProbeConfig) -> Option<Indicator> {
    let found = config
        .su_binary_paths()
        .find(|path| can_open_for_read(path))
        .map(Indicator::SuBinary);
    log_outcome("su binary", &found);
    found
}

/// First root management app data entry that exists, whatever its type.
///
/// Uses a metadata query rather than an open: app data directories are
/// usually unreadable to other apps even when present.
pub fn find_root_app_data(config: &ProbeConfig) -> Option<Indicator> {
    let found = config
        .root_app_data_paths()
        .find(|path| entry_exists(path))
        .map(Indicator::RootAppData);
    log_outcome("root app data", &found);
    found
}

/// Writable protected path, then test-keys build tag, then debuggable flag
pub fn find_dangerous_state(
    config: &ProbeConfig,
    props: &dyn PropertySource,
) -> Option<Indicator> {
    let target = config.write_probe_target();
    let found = if can_open_for_write(&target) {
        Some(Indicator::WritableSystemPath(target))
    } else {
        [&config.build_tags, &config.debuggable]
            .into_iter()
            .find(|marker| marker.matches(props))
            .map(marker_indicator)
    };
    log_outcome("dangerous state", &found);
    found
}

fn marker_indicator(marker: &PropertyMarker) -> Indicator {
    Indicator::Property {
        name: marker.name.clone(),
        value: marker.value.clone(),
    }
}

fn can_open_for_read(path: &Path) -> bool {
    match File::open(path) {
        // handle dropped here
        Ok(_) => true,
        Err(err) => {
            log::trace!("open {} failed: {}", path.display(), err);
            false
        }
    }
}

fn entry_exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(err) => {
            log::trace!("stat {} failed: {}", path.display(), err);
            false
        }
    }
}

/// Write access without O_CREAT or O_TRUNC: a writable target is left as is.
fn can_open_for_write(path: &Path) -> bool {
    match OpenOptions::new().write(true).open(path) {
        Ok(_) => true,
        Err(err) => {
            log::trace!("open {} for write failed: {}", path.display(), err);
            false
        }
    }
}

fn log_outcome(probe: &str, found: &Option<Indicator>) {
    match found {
        Some(indicator) => log::info!("{}", indicator),
        None => log::debug!("{} probe: no indicator found", probe),
    }
}
