// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end coverage of the safety, content-screen and audit endpoints
//! through the real router, with the intent classifier disabled so every
//! behaviour is deterministic.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

use solace_safety_node::api::{build_router, ApiServer};
use solace_safety_node::hazard::{HazardLogger, HazardSink, MemoryHazardSink};
use solace_safety_node::monitoring::OpsAlertChannel;
use solace_safety_node::pathway::PathwayManager;
use solace_safety_node::redaction::Redactor;
use solace_safety_node::resources::ResourceRegistry;
use solace_safety_node::safety::{DisabledIntentProvider, IntentGate, SafetyOrchestrator};

fn test_app() -> (Router, Arc<MemoryHazardSink>) {
    let registry = Arc::new(ResourceRegistry::new());
    let sink = Arc::new(MemoryHazardSink::new());
    let alerts = OpsAlertChannel::default();
    let logger = Arc::new(HazardLogger::new(sink.clone(), alerts.clone()));
    let gate = IntentGate::new(Arc::new(DisabledIntentProvider), Duration::from_millis(50));
    let orchestrator = SafetyOrchestrator::new(
        Redactor::default(),
        gate,
        registry.clone(),
        logger.clone(),
        alerts,
    );
    let server = ApiServer::new(orchestrator, PathwayManager::default(), logger, registry);
    (build_router(Arc::new(server)), sink)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_emergency_message_kills_session_and_logs() {
    let (app, sink) = test_app();

    let request = post_json(
        "/v1/safety/check",
        r#"{"text": "I want to kill myself", "subject_id": "s-1"}"#,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["safe"], false);
    assert_eq!(body["severity"], "CRITICAL");
    assert_eq!(body["action"], "kill_session");
    assert!(body["safety_card"].is_object());
    assert!(!body["resources"].as_array().unwrap().is_empty());

    // The audit entry was written before the response went out.
    let entries = sink.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].subject_id, "s-1");
    assert!(entries[0].session_killed);
}

#[tokio::test]
async fn test_ordinary_message_continues_without_audit_entry() {
    let (app, sink) = test_app();

    let request = post_json(
        "/v1/safety/check",
        r#"{"text": "I'm a bit stressed about work", "subject_id": "s-1"}"#,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["safe"], true);
    assert_eq!(body["action"], "continue");
    assert!(body.get("safety_card").is_none());

    assert!(sink.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_quick_check_skips_the_classifier_entirely() {
    let (app, _sink) = test_app();

    // Single ambiguous phrase; full mode would consult the (disabled)
    // classifier and come back flagged for review. Quick mode must not.
    let request = post_json(
        "/v1/safety/check",
        r#"{"text": "I feel hopeless today", "subject_id": "s-1", "quick_check_only": true}"#,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["severity"], "MEDIUM");
    assert_eq!(body["requires_human_review"], false);
}

#[tokio::test]
async fn test_empty_text_is_a_validation_error() {
    let (app, _sink) = test_app();

    let request = post_json("/v1/safety/check", r#"{"text": "   "}"#);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["details"]["field"], "text");
}

#[tokio::test]
async fn test_oversize_text_is_rejected() {
    let (app, _sink) = test_app();

    let text = "a".repeat(10_001);
    let request = post_json(
        "/v1/safety/check",
        &format!(r#"{{"text": "{}"}}"#, text),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_screen_endpoint_rewrites_and_reports_violations() {
    let (app, sink) = test_app();

    let request = post_json(
        "/v1/content/screen",
        r#"{"text": "It's not that bad. Tomorrow is a new day.", "subject_id": "s-2"}"#,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["rewritten"], true);
    assert_eq!(body["violations"][0], "minimizing");
    assert!(!body["text"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("not that bad"));

    // Rewrites leave an audit trail too.
    let entries = sink.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]
        .detected_pattern_summary
        .iter()
        .any(|s| s.starts_with("banned:")));
}

#[tokio::test]
async fn test_clean_reply_passes_screen_without_logging() {
    let (app, sink) = test_app();

    let request = post_json(
        "/v1/content/screen",
        r#"{"text": "That sounds heavy. What would feel manageable right now?"}"#,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["rewritten"], false);
    assert!(sink.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_audit_export_returns_taxonomy_and_entries() {
    let (app, _sink) = test_app();

    // Generate one entry first.
    let check = post_json(
        "/v1/safety/check",
        r#"{"text": "I want to end my life", "subject_id": "s-3"}"#,
    );
    app.clone().oneshot(check).await.unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/audit/export")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(!body["taxonomy"].as_array().unwrap().is_empty());
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["subject_id"], "s-3");
}

#[tokio::test]
async fn test_resources_endpoint_lists_builtin_directory() {
    let (app, _sink) = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/resources")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let resources = body.as_array().unwrap();
    assert!(!resources.is_empty());
    assert!(resources.iter().any(|r| r["id"] == "samaritans"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _sink) = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().unwrap().starts_with('v'));
}
