// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Compiled-in indicator tables.

/// Superuser binary locations, checked in this order
pub const SU_BINARY_PATHS: &[&str] = &[
    "/system/bin/su",
    "/system/xbin/su",
    "/sbin/su",
    "/su/bin/su",
    "/magisk/.core/bin/su",
    "/system/usr/we-need-root/su-backup",
    "/system/xbin/mu",
    "/data/local/xbin/su",
    "/data/local/bin/su",
    "/system/sd/xbin/su",
    "/system/bin/failsafe/su",
    "/data/local/su",
];

/// Data directories of root management apps
pub const ROOT_APP_DATA_PATHS: &[&str] = &[
    "/data/data/com.noshufou.android.su",
    "/data/data/com.thirdparty.superuser",
    "/data/data/eu.chainfire.supersu",
    "/data/data/com.koushikdutta.superuser",
    "/data/data/com.zachspong.temprootremovejb",
    "/data/data/com.ramdroid.appquarantine",
    "/data/data/com.topjohnwu.magisk",
];

/// Must never be writable on a stock device
pub const PROTECTED_SYSTEM_PATH: &str = "/system";

/// Build signed with test keys (custom ROM)
pub const BUILD_TAGS_MARKER: (&str, &str) = ("ro.build.tags", "test-keys");

/// Debuggable build
pub const DEBUGGABLE_MARKER: (&str, &str) = ("ro.debuggable", "1");

/// Property files consulted when there is no native property store
pub const PROP_FILES: &[&str] = &[
    "/system/build.prop",
    "/default.prop",
    "/vendor/build.prop",
];
