// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1

//! The JSONL sink against a real filesystem, plus logger behaviour when
//! the sink is healthy and when it is not.

use std::sync::Arc;

use solace_safety_node::hazard::{
    HazardError, HazardLogEntry, HazardLogger, HazardSink, JsonlHazardSink, MemoryHazardSink,
};
use solace_safety_node::monitoring::{AlertLevel, OpsAlertChannel};
use solace_safety_node::safety::{SafetyVerdict, SeverityLevel, TriggerKind};

fn high_verdict() -> SafetyVerdict {
    SafetyVerdict::unsafe_at(SeverityLevel::High, TriggerKind::Keyword, 0.9)
        .with_kill_session()
        .with_clinical_card()
        .with_signals(vec!["high_risk:no reason to live".to_string()])
}

#[tokio::test]
async fn test_jsonl_round_trip_preserves_entries_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(JsonlHazardSink::new(dir.path().join("hazard.jsonl")));
    let logger = HazardLogger::new(sink.clone(), OpsAlertChannel::default());

    let first = logger
        .record("subject-a", &high_verdict(), vec!["kill_session".to_string()], true)
        .await;
    let second = logger
        .record(
            "subject-b",
            &SafetyVerdict::unsafe_at(SeverityLevel::Medium, TriggerKind::ModelIntent, 0.7),
            vec!["offer_resources".to_string()],
            false,
        )
        .await;
    assert!(first.persisted);
    assert!(second.persisted);

    let entries = sink.entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, first.entry_id);
    assert_eq!(entries[0].subject_id, "subject-a");
    assert!(entries[0].session_killed);
    assert!(entries[0].card_shown);
    assert_eq!(entries[1].id, second.entry_id);
    assert_eq!(entries[1].severity, SeverityLevel::Medium);
}

#[tokio::test]
async fn test_jsonl_file_survives_sink_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hazard.jsonl");

    {
        let sink = Arc::new(JsonlHazardSink::new(path.clone()));
        let logger = HazardLogger::new(sink, OpsAlertChannel::default());
        logger
            .record("subject-a", &high_verdict(), vec![], true)
            .await;
    }

    // A fresh sink over the same file reads what the first one wrote.
    let reopened = JsonlHazardSink::new(path);
    let entries = reopened.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].subject_id, "subject-a");
}

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let sink = JsonlHazardSink::new(dir.path().join("never-written.jsonl"));
    let entries = sink.entries().await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_signal_summary_never_contains_raw_text_over_limit() {
    let sink = Arc::new(MemoryHazardSink::new());
    let logger = HazardLogger::new(sink.clone(), OpsAlertChannel::default());

    let long_signal = format!("high_risk:{}", "x".repeat(300));
    let verdict = SafetyVerdict::unsafe_at(SeverityLevel::High, TriggerKind::Keyword, 0.9)
        .with_signals(vec![long_signal]);
    logger.record("subject-a", &verdict, vec![], false).await;

    let entries = sink.entries().await.unwrap();
    assert!(entries[0].detected_pattern_summary[0].len() <= 80);
}

#[tokio::test]
async fn test_query_views_filter_and_order() {
    let sink = Arc::new(MemoryHazardSink::new());
    let logger = HazardLogger::new(sink, OpsAlertChannel::default());

    logger.record("a", &high_verdict(), vec![], true).await;
    logger
        .record(
            "b",
            &SafetyVerdict::unsafe_at(SeverityLevel::Medium, TriggerKind::ModelIntent, 0.6),
            vec![],
            false,
        )
        .await;
    logger.record("a", &high_verdict(), vec![], true).await;

    let high = logger.by_severity(SeverityLevel::High).await.unwrap();
    assert_eq!(high.len(), 2);

    let for_a = logger.by_subject("a").await.unwrap();
    assert_eq!(for_a.len(), 2);
    assert!(for_a.iter().all(|e| e.subject_id == "a"));

    // Newest first, capped at n.
    let recent = logger.recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].timestamp >= recent[1].timestamp);

    let export = logger.export_for_audit().await.unwrap();
    assert_eq!(export.entries.len(), 3);
    assert!(!export.taxonomy.is_empty());
}

#[tokio::test]
async fn test_sink_failure_raises_critical_alert_but_still_returns_handle() {
    let alerts = OpsAlertChannel::default();
    let mut rx = alerts.subscribe();

    struct RefusingSink;
    #[async_trait::async_trait]
    impl HazardSink for RefusingSink {
        async fn append(&self, _entry: &HazardLogEntry) -> Result<(), HazardError> {
            Err(HazardError::Append(std::io::Error::other("disk full")))
        }
        async fn entries(&self) -> Result<Vec<HazardLogEntry>, HazardError> {
            Ok(Vec::new())
        }
    }

    let logger = HazardLogger::new(Arc::new(RefusingSink), alerts);
    let handle = logger.record("subject-a", &high_verdict(), vec![], true).await;
    assert!(!handle.persisted);

    let alert = rx.try_recv().unwrap();
    assert_eq!(alert.level, AlertLevel::Critical);
}
