// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Durable audit trail of every safety-relevant decision.
//!
//! Ordering guarantee: the orchestrator calls [`HazardLogger::record`]
//! before the user-visible response is finalized. A failed write never
//! suppresses or delays the safety response; it raises an operational
//! alert instead and the returned handle is marked unpersisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::sink::{HazardError, HazardSink};
use super::taxonomy::{hazard_taxonomy, HazardCategory};
use crate::monitoring::{AlertLevel, OpsAlertChannel};
use crate::safety::verdict::{SafetyVerdict, SeverityLevel, TriggerKind};

const SIGNAL_SUMMARY_MAX: usize = 80;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub subject_id: String,
    pub trigger: TriggerKind,
    pub severity: SeverityLevel,
    /// Tier-tagged signal names, truncated. Never raw message text.
    pub detected_pattern_summary: Vec<String>,
    pub confidence: f64,
    pub actions_taken: Vec<String>,
    pub session_killed: bool,
    pub card_shown: bool,
    pub resources_offered: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogHandle {
    pub entry_id: Uuid,
    pub persisted: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AuditExport {
    pub generated_at: DateTime<Utc>,
    pub taxonomy: Vec<HazardCategory>,
    pub entries: Vec<HazardLogEntry>,
}

pub struct HazardLogger {
    sink: Arc<dyn HazardSink>,
    alerts: OpsAlertChannel,
}

impl HazardLogger {
    pub fn new(sink: Arc<dyn HazardSink>, alerts: OpsAlertChannel) -> Self {
        HazardLogger { sink, alerts }
    }

    /// Append an audit entry for a verdict. Infallible from the caller's
    /// point of view: persistence failure is reported on the ops channel
    /// and reflected in the handle, nothing more.
    pub async fn record(
        &self,
        subject_id: &str,
        verdict: &SafetyVerdict,
        actions_taken: Vec<String>,
        card_shown: bool,
    ) -> LogHandle {
        let entry = HazardLogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            subject_id: subject_id.to_string(),
            trigger: verdict.trigger,
            severity: verdict.severity,
            detected_pattern_summary: verdict
                .matched_signals
                .iter()
                .map(|s| truncate(s, SIGNAL_SUMMARY_MAX))
                .collect(),
            confidence: verdict.confidence,
            actions_taken,
            session_killed: verdict.should_kill_session,
            card_shown,
            resources_offered: verdict
                .recommended_resources
                .iter()
                .map(|r| r.id.clone())
                .collect(),
        };

        let persisted = match self.sink.append(&entry).await {
            Ok(()) => true,
            Err(err) => {
                self.alerts.raise(
                    AlertLevel::Critical,
                    "hazard_logger",
                    format!("hazard entry {} not persisted: {}", entry.id, err),
                );
                false
            }
        };

        LogHandle {
            entry_id: entry.id,
            persisted,
        }
    }

    pub async fn by_severity(
        &self,
        severity: SeverityLevel,
    ) -> Result<Vec<HazardLogEntry>, HazardError> {
        Ok(self
            .sink
            .entries()
            .await?
            .into_iter()
            .filter(|e| e.severity == severity)
            .collect())
    }

    pub async fn by_subject(&self, subject_id: &str) -> Result<Vec<HazardLogEntry>, HazardError> {
        Ok(self
            .sink
            .entries()
            .await?
            .into_iter()
            .filter(|e| e.subject_id == subject_id)
            .collect())
    }

    /// Most recent `n` entries, newest first.
    pub async fn recent(&self, n: usize) -> Result<Vec<HazardLogEntry>, HazardError> {
        let mut entries = self.sink.entries().await?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(n);
        Ok(entries)
    }

    /// Full dump plus the static taxonomy, for regulatory review. Read-only;
    /// never consumed by the running application logic.
    pub async fn export_for_audit(&self) -> Result<AuditExport, HazardError> {
        Ok(AuditExport {
            generated_at: Utc::now(),
            taxonomy: hazard_taxonomy(),
            entries: self.sink.entries().await?,
        })
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
