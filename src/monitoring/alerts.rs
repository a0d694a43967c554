// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
// src/monitoring/alerts.rs - Operational alert channel
//
// Carries failures that must reach operators without touching the user's
// safety response: hazard-log write failures and classifier outages. The
// channel is fire-and-forget; a missing subscriber only means the alert is
// logged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpsAlert {
    pub level: AlertLevel,
    pub source: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct OpsAlertChannel {
    sender: broadcast::Sender<OpsAlert>,
}

impl OpsAlertChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        OpsAlertChannel { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OpsAlert> {
        self.sender.subscribe()
    }

    pub fn raise(&self, level: AlertLevel, source: &str, message: String) {
        let alert = OpsAlert {
            level,
            source: source.to_string(),
            message,
            timestamp: Utc::now(),
        };
        match level {
            AlertLevel::Critical => {
                tracing::error!(source = %alert.source, "{}", alert.message)
            }
            AlertLevel::Warning => {
                tracing::warn!(source = %alert.source, "{}", alert.message)
            }
            AlertLevel::Info => tracing::info!(source = %alert.source, "{}", alert.message),
        }
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.sender.send(alert);
    }
}

impl Default for OpsAlertChannel {
    fn default() -> Self {
        Self::new(100)
    }
}
