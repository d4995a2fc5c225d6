// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Probe configuration.
//!
//! `ProbeConfig::default()` is exactly the compiled-in tables. Callers may
//! override any of them from JSON, and may set `root` to resolve every
//! absolute path under a prefix directory (a mounted system image, or a
//! fake device tree in tests).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::{
    BUILD_TAGS_MARKER, DEBUGGABLE_MARKER, PROP_FILES, PROTECTED_SYSTEM_PATH,
    ROOT_APP_DATA_PATHS, SU_BINARY_PATHS,
};
use crate::props::PropertySource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid probe config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} entry '{path}' is not an absolute path")]
    RelativePath { field: &'static str, path: String },

    #[error("{field} marker has an empty property name")]
    EmptyMarkerName { field: &'static str },
}

/// A (property name, expected value) pair compared by exact equality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMarker {
    pub name: String,
    pub value: String,
}

impl PropertyMarker {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// True if the property is set and equals the marker value
    pub fn matches(&self, props: &dyn PropertySource) -> bool {
        props.get(&self.name).as_deref() == Some(self.value.as_str())
    }
}

impl From<(&str, &str)> for PropertyMarker {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeConfig {
    pub root: Option<PathBuf>,
    pub su_paths: Vec<String>,
    pub root_app_paths: Vec<String>,
    pub write_probe_path: String,
    pub build_tags: PropertyMarker,
    pub debuggable: PropertyMarker,
    pub prop_files: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            root: None,
            su_paths: to_owned(SU_BINARY_PATHS),
            root_app_paths: to_owned(ROOT_APP_DATA_PATHS),
            write_probe_path: PROTECTED_SYSTEM_PATH.to_string(),
            build_tags: BUILD_TAGS_MARKER.into(),
            debuggable: DEBUGGABLE_MARKER.into(),
            prop_files: to_owned(PROP_FILES),
        }
    }
}

fn to_owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

impl ProbeConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ProbeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config handed over by the Kotlin layer. Blank input means defaults;
    /// an invalid config is logged and replaced by the defaults.
    pub fn from_json_or_default(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        Self::from_json(json).unwrap_or_else(|err| {
            log::warn!("{}, using defaults", err);
            Self::default()
        })
    }

    /// Default tables resolved under `root`
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_absolute("suPaths", &self.su_paths)?;
        check_absolute("rootAppPaths", &self.root_app_paths)?;
        check_absolute("propFiles", &self.prop_files)?;
        check_absolute("writeProbePath", std::slice::from_ref(&self.write_probe_path))?;

        if self.build_tags.name.is_empty() {
            return Err(ConfigError::EmptyMarkerName { field: "buildTags" });
        }
        if self.debuggable.name.is_empty() {
            return Err(ConfigError::EmptyMarkerName { field: "debuggable" });
        }
        Ok(())
    }

    /// Map a configured absolute path onto the filesystem being probed
    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')),
            None => PathBuf::from(path),
        }
    }

    pub fn su_binary_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.su_paths.iter().map(|p| self.resolve(p))
    }

    pub fn root_app_data_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.root_app_paths.iter().map(|p| self.resolve(p))
    }

    pub fn prop_file_paths(&self) -> Vec<PathBuf> {
        self.prop_files.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn write_probe_target(&self) -> PathBuf {
        self.resolve(&self.write_probe_path)
    }
}

fn check_absolute(field: &'static str, paths: &[String]) -> Result<(), ConfigError> {
    match paths.iter().find(|p| !Path::new(p).is_absolute()) {
        Some(path) => Err(ConfigError::RelativePath {
            field,
            path: path.clone(),
        }),
        None => Ok(()),
    }
}
