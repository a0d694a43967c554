// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration from environment variables with defaulted
//! fallbacks. Anything jurisdiction-specific (the resource registry)
//! lives in its own file so it can change without a redeploy.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub listen_addr: String,
    /// Hosted classifier endpoint; empty disables the intent gate entirely
    /// (every low-confidence check then degrades).
    pub classifier_endpoint: String,
    pub classifier_api_key: Option<String>,
    pub classifier_model: String,
    /// Aggregate budget for the dual-gate check. The classifier call gets
    /// what remains of it.
    pub classifier_timeout: Duration,
    pub keyword_certainty_threshold: f64,
    pub pathway_cooldown_secs: i64,
    pub hazard_log_path: PathBuf,
    pub resource_registry_path: Option<PathBuf>,
    pub redact_dates: bool,
    pub redact_names: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let api_port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
        let classifier_timeout_ms = env::var("CLASSIFIER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1500);

        Settings {
            listen_addr: format!("127.0.0.1:{}", api_port),
            classifier_endpoint: env::var("CLASSIFIER_ENDPOINT").unwrap_or_default(),
            classifier_api_key: env::var("CLASSIFIER_API_KEY").ok(),
            classifier_model: env::var("CLASSIFIER_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            classifier_timeout: Duration::from_millis(classifier_timeout_ms),
            keyword_certainty_threshold: env::var("KEYWORD_CERTAINTY_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(0.9),
            pathway_cooldown_secs: env::var("PATHWAY_COOLDOWN_SECS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
            hazard_log_path: env::var("HAZARD_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/hazard_log.jsonl")),
            resource_registry_path: env::var("RESOURCE_REGISTRY_PATH").ok().map(PathBuf::from),
            redact_dates: env_flag("REDACT_DATES"),
            redact_names: env_flag("REDACT_NAMES"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(false)
}
