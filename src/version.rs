// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Solace Safety Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-dual-gate-2025-08-29";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-08-29";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "keyword-gate",
    "intent-classifier-gate",
    "dual-gate-merge",
    "pii-redaction",
    "clinical-safety-cards",
    "banned-phrase-screen",
    "hazard-audit-log",
    "pathway-state-machine",
    "uk-resource-registry",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Solace Safety Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
