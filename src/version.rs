// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Proctor Vision Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-yolos-verdicts-2025-11-03";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-11-03";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "yolos-tiny-onnx",
    "cpu-inference",
    "data-url-frames",
    "cell-phone-rule",
    "multiple-people-rule",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Proctor Vision Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
