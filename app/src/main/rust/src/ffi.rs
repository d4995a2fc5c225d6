// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! JNI bindings for `com.islab.rootbeer.data.datasource.NativeRootDetectionDataSource`

use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

#[cfg(target_os = "android")]
use android_logger::Config;
#[cfg(target_os = "android")]
use log::LevelFilter;

use crate::config::ProbeConfig;
use crate::props::SystemProperties;
use crate::report::{ProbeReport, FALLBACK_REPORT_JSON};

fn to_jboolean(found: bool) -> jboolean {
    if found {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// Initialize logging for Android
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn Java_com_islab_rootbeer_data_datasource_NativeRootDetectionDataSource_nativeInit(
    _env: JNIEnv,
    _this: JObject,
) {
    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Info)
            .with_tag("NativeRootDetection"),
    );
}

#[cfg(not(target_os = "android"))]
#[no_mangle]
pub extern "C" fn Java_com_islab_rootbeer_data_datasource_NativeRootDetectionDataSource_nativeInit(
    _env: JNIEnv,
    _this: JObject,
) {
    // No-op for non-Android platforms
}

#[no_mangle]
pub extern "C" fn Java_com_islab_rootbeer_data_datasource_NativeRootDetectionDataSource_checkSuBinary(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(crate::probe_su_binary())
}

#[no_mangle]
pub extern "C" fn Java_com_islab_rootbeer_data_datasource_NativeRootDetectionDataSource_checkRootApps(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(crate::probe_root_management_apps())
}

#[no_mangle]
pub extern "C" fn Java_com_islab_rootbeer_data_datasource_NativeRootDetectionDataSource_checkDangerousProps(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    to_jboolean(crate::probe_dangerous_state())
}

/// Run all probes - JNI entry point
///
/// Returns JSON string with ProbeReport. `config_json` may be null or empty;
/// an invalid config is logged and the compiled-in tables are used instead.
#[no_mangle]
pub extern "C" fn Java_com_islab_rootbeer_data_datasource_NativeRootDetectionDataSource_nativeProbeReport(
    mut env: JNIEnv,
    _this: JObject,
    config_json: JString,
) -> jstring {
    let config = read_config(&mut env, &config_json);
    let props = SystemProperties::for_config(&config);
    let json = ProbeReport::collect(&config, &props).to_json();

    match env.new_string(&json) {
        Ok(jstr) => jstr.into_raw(),
        Err(_) => match env.new_string(FALLBACK_REPORT_JSON) {
            Ok(jstr) => jstr.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
    }
}

fn read_config(env: &mut JNIEnv, config_json: &JString) -> ProbeConfig {
    if config_json.is_null() {
        return ProbeConfig::default();
    }
    match env.get_string(config_json) {
        Ok(s) => ProbeConfig::from_json_or_default(&s.to_string_lossy()),
        Err(err) => {
            log::warn!("unreadable probe config, using defaults: {}", err);
            ProbeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_jboolean() {
        assert_eq!(to_jboolean(true), JNI_TRUE);
        assert_eq!(to_jboolean(false), JNI_FALSE);
    }
}
