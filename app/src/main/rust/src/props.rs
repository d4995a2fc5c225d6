// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! System property access.
//!
//! On Android properties come from the native property service. Everywhere
//! else they are read from `build.prop`-style files, the same files the
//! property service is seeded from at boot.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::ProbeConfig;

/// Read-only view of a system property store.
///
/// Implementations return `None` for unset properties and for any read
/// failure; an empty value counts as unset.
pub trait PropertySource {
    fn get(&self, name: &str) -> Option<String>;
}

/// The live property store of the running device
#[derive(Debug, Clone, Default)]
pub struct SystemProperties {
    #[cfg_attr(target_os = "android", allow(dead_code))]
    prop_files: Vec<PathBuf>,
}

impl SystemProperties {
    pub fn new(prop_files: Vec<PathBuf>) -> Self {
        Self { prop_files }
    }

    pub fn for_config(config: &ProbeConfig) -> Self {
        Self::new(config.prop_file_paths())
    }
}

impl PropertySource for SystemProperties {
    #[cfg(target_os = "android")]
    fn get(&self, name: &str) -> Option<String> {
        native::get(name)
    }

    #[cfg(not(target_os = "android"))]
    fn get(&self, name: &str) -> Option<String> {
        self.prop_files.iter().find_map(|file| {
            // Vendor images may carry Latin-1 values; decode lossily
            let bytes = match std::fs::read(file) {
                Ok(bytes) => bytes,
                Err(err) => {
                    log::trace!("skipping prop file {}: {}", file.display(), err);
                    return None;
                }
            };
            lookup(&String::from_utf8_lossy(&bytes), name).map(str::to_string)
        })
    }
}

#[cfg(target_os = "android")]
mod native {
    use std::ffi::{CStr, CString};

    /// Bionic's buffer size for a property value, including the NUL
    const PROP_VALUE_MAX: usize = 92;

    pub(super) fn get(name: &str) -> Option<String> {
        let name = CString::new(name).ok()?;
        let mut value = [0 as libc::c_char; PROP_VALUE_MAX];
        // SAFETY: `name` is NUL-terminated and `value` holds PROP_VALUE_MAX
        // bytes, the most __system_property_get ever writes.
        let len = unsafe { libc::__system_property_get(name.as_ptr(), value.as_mut_ptr()) };
        if len <= 0 {
            return None;
        }
        // SAFETY: on success the buffer is NUL-terminated.
        let value = unsafe { CStr::from_ptr(value.as_ptr()) };
        Some(value.to_string_lossy().into_owned())
    }
}

/// In-memory property store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProperties {
    values: HashMap<String, String>,
}

impl StaticProperties {
    /// Load every key from a `build.prop`-style document. The first
    /// assignment to a key wins, as with `ro.*` properties at boot.
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();
        for (key, value) in content.lines().filter_map(parse_line) {
            values
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { values }
    }
}

impl PropertySource for StaticProperties {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split one `key=value` line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Value of the first assignment to `name`, unless it is empty
#[cfg_attr(target_os = "android", allow(dead_code))]
fn lookup<'a>(content: &'a str, name: &str) -> Option<&'a str> {
    content
        .lines()
        .filter_map(parse_line)
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case("ro.build.tags=test-keys", Some(("ro.build.tags", "test-keys")))]
    #[case("  ro.debuggable = 1  ", Some(("ro.debuggable", "1")))]
    #[case("ro.product.name=a=b", Some(("ro.product.name", "a=b")))]
    #[case("ro.empty=", Some(("ro.empty", "")))]
    #[case("# ro.debuggable=1", None)]
    #[case("", None)]
    #[case("import /vendor/build.prop", None)]
    #[case("=orphan", None)]
    fn test_parse_line(#[case] line: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(parse_line(line), expected);
    }

    #[test]
    fn test_lookup_first_assignment() {
        let content = "# build\nro.debuggable=0\nro.debuggable=1\n";
        assert_eq!(lookup(content, "ro.debuggable"), Some("0"));
        assert_eq!(lookup(content, "ro.secure"), None);
    }

    #[test]
    fn test_static_properties_empty_is_unset() {
        let props = StaticProperties::parse("ro.build.tags=\nro.debuggable=1\n");
        assert_eq!(props.get("ro.build.tags"), None);
        assert_eq!(props.get("ro.debuggable").as_deref(), Some("1"));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_system_properties_reads_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let system = dir.path().join("build.prop");
        let default = dir.path().join("default.prop");
        fs::write(&system, "ro.build.tags=release-keys\n").unwrap();
        fs::write(&default, "ro.build.tags=test-keys\nro.debuggable=1\n").unwrap();

        let missing = dir.path().join("missing.prop");
        let props = SystemProperties::new(vec![missing, system, default]);
        assert_eq!(props.get("ro.build.tags").as_deref(), Some("release-keys"));
        assert_eq!(props.get("ro.debuggable").as_deref(), Some("1"));
        assert_eq!(props.get("ro.secure"), None);
    }

    #[test]
    fn test_static_properties_first_assignment_wins() {
        let props = StaticProperties::parse("ro.debuggable=0\nro.debuggable=1\n");
        assert_eq!(props.get("ro.debuggable").as_deref(), Some("0"));
        assert_eq!(
            props.get("ro.debuggable").as_deref(),
            lookup("ro.debuggable=0\nro.debuggable=1\n", "ro.debuggable")
        );
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_system_properties_tolerates_latin1_values() {
        let dir = tempfile::tempdir().unwrap();
        let system = dir.path().join("build.prop");
        fs::write(&system, b"ro.product.model=Caf\xe9\nro.build.tags=test-keys\n").unwrap();

        let props = SystemProperties::new(vec![system]);
        assert_eq!(props.get("ro.build.tags").as_deref(), Some("test-keys"));
        assert_eq!(props.get("ro.product.model").as_deref(), Some("Caf\u{FFFD}"));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_system_properties_without_files() {
        let props = SystemProperties::default();
        assert_eq!(props.get("ro.build.tags"), None);
    }
}
