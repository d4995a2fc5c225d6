// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Per-probe findings serialized for the Kotlin layer.
//!
//! The report lists each probe separately. Combining them into a verdict is
//! left to the caller.

use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;
use crate::probes::{find_dangerous_state, find_root_app_data, find_su_binary, Indicator};
use crate::props::PropertySource;

pub const KEY_SU_BINARY: &str = "checkSuBinary";
pub const KEY_ROOT_APPS: &str = "checkRootApps";
pub const KEY_DANGEROUS_PROPS: &str = "checkDangerousProps";

/// Returned when the report itself cannot be serialized
pub const FALLBACK_REPORT_JSON: &str = r#"{"findings":[{"key":"checkSuBinary","description":"su binary present","detected":false,"indicator":null},{"key":"checkRootApps","description":"Root management app data present","detected":false,"indicator":null},{"key":"checkDangerousProps","description":"Dangerous system properties","detected":false,"indicator":null}],"timestampMs":0}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeFinding {
    pub key: String,
    pub description: String,
    pub detected: bool,
    pub indicator: Option<String>,
}

impl ProbeFinding {
    fn new(key: &str, description: &str, found: Option<Indicator>) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
            detected: found.is_some(),
            indicator: found.map(|i| i.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub findings: Vec<ProbeFinding>,
    pub timestamp_ms: i64,
}

impl ProbeReport {
    /// Run every probe once, in declaration order
    pub fn collect(config: &ProbeConfig, props: &dyn PropertySource) -> Self {
        let findings = vec![
            ProbeFinding::new(KEY_SU_BINARY, "su binary present", find_su_binary(config)),
            ProbeFinding::new(
                KEY_ROOT_APPS,
                "Root management app data present",
                find_root_app_data(config),
            ),
            ProbeFinding::new(
                KEY_DANGEROUS_PROPS,
                "Dangerous system properties",
                find_dangerous_state(config, props),
            ),
        ];

        ProbeReport {
            findings,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn finding(&self, key: &str) -> Option<&ProbeFinding> {
        self.findings.iter().find(|f| f.key == key)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::warn!("failed to serialize probe report: {}", err);
            FALLBACK_REPORT_JSON.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::StaticProperties;
    use std::fs;

    #[test]
    fn test_report_lists_each_probe() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProbeConfig::rooted_at(dir.path());
        fs::create_dir_all(config.resolve("/data/data/com.topjohnwu.magisk")).unwrap();
        let props: StaticProperties = [("ro.debuggable", "1")].into_iter().collect();

        let report = ProbeReport::collect(&config, &props);
        let keys: Vec<&str> = report.findings.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec![KEY_SU_BINARY, KEY_ROOT_APPS, KEY_DANGEROUS_PROPS]);

        assert!(!report.finding(KEY_SU_BINARY).unwrap().detected);
        assert_eq!(report.finding(KEY_SU_BINARY).unwrap().indicator, None);

        let apps = report.finding(KEY_ROOT_APPS).unwrap();
        assert!(apps.detected);
        assert!(apps.indicator.as_deref().unwrap().ends_with("com.topjohnwu.magisk"));

        let props = report.finding(KEY_DANGEROUS_PROPS).unwrap();
        assert_eq!(props.indicator.as_deref(), Some("Dangerous property: ro.debuggable=1"));
        assert!(report.timestamp_ms > 0);
    }

    #[test]
    fn test_report_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProbeConfig::rooted_at(dir.path());
        let report = ProbeReport::collect(&config, &StaticProperties::default());

        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert!(value["timestampMs"].is_i64());
        assert_eq!(value["findings"].as_array().unwrap().len(), 3);
        assert_eq!(value["findings"][0]["key"], "checkSuBinary");
        assert_eq!(value["findings"][0]["detected"], false);
        assert!(value["findings"][0]["indicator"].is_null());
        assert!(value.get("rooted").is_none());
    }

    #[test]
    fn test_fallback_report_parses() {
        let report: ProbeReport = serde_json::from_str(FALLBACK_REPORT_JSON).unwrap();
        assert_eq!(report.findings.len(), 3);
        assert!(report.findings.iter().all(|f| !f.detected));
    }
}
