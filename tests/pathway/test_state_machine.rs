// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1

//! Cooldown and escalation behaviour of the pathway machine, driven
//! through the pure transition function with explicit clocks so the
//! cooldown edge cases are deterministic.

use chrono::{Duration, Utc};
use solace_safety_node::pathway::{
    pathway_profile, suggest_pathway, transition, Pathway, PathwayManager, SuggestionSignals,
};

const COOLDOWN: Duration = Duration::seconds(30);

#[test]
fn test_de_escalation_blocked_inside_cooldown() {
    let changed_at = Utc::now();
    let now = changed_at + Duration::seconds(15);
    let decision = transition(Pathway::High, Pathway::Low, changed_at, now, COOLDOWN);
    assert!(!decision.allowed);
    assert_eq!(decision.new_state, Pathway::High);
    assert!(decision.message.is_none());
}

#[test]
fn test_de_escalation_allowed_after_cooldown() {
    let changed_at = Utc::now();
    let now = changed_at + Duration::seconds(60);
    let decision = transition(Pathway::High, Pathway::Low, changed_at, now, COOLDOWN);
    assert!(decision.allowed);
    assert_eq!(decision.new_state, Pathway::Low);
    assert!(decision.message.is_some());
}

#[test]
fn test_escalation_to_high_ignores_cooldown() {
    let changed_at = Utc::now();
    // One second after the last change, well inside the window.
    let now = changed_at + Duration::seconds(1);
    for from in [Pathway::Low, Pathway::Mid] {
        let decision = transition(from, Pathway::High, changed_at, now, COOLDOWN);
        assert!(decision.allowed, "escalation from {:?} was blocked", from);
        assert_eq!(decision.new_state, Pathway::High);
    }
}

#[test]
fn test_same_state_is_a_silent_no_op() {
    let changed_at = Utc::now();
    let now = changed_at + Duration::seconds(120);
    let decision = transition(Pathway::Mid, Pathway::Mid, changed_at, now, COOLDOWN);
    assert!(!decision.allowed);
    assert_eq!(decision.new_state, Pathway::Mid);
    assert!(decision.message.is_none());
}

#[test]
fn test_lateral_move_to_mid_respects_cooldown() {
    let changed_at = Utc::now();
    let inside = changed_at + Duration::seconds(10);
    let outside = changed_at + Duration::seconds(45);

    let blocked = transition(Pathway::Low, Pathway::Mid, changed_at, inside, COOLDOWN);
    assert!(!blocked.allowed);

    let allowed = transition(Pathway::Low, Pathway::Mid, changed_at, outside, COOLDOWN);
    assert!(allowed.allowed);
    assert_eq!(allowed.new_state, Pathway::Mid);
}

#[test]
fn test_suggestion_priorities() {
    // Crisis flag dominates a calm self-report.
    let crisis = SuggestionSignals {
        intensity: Some(2),
        recent_crisis: true,
        indicators: vec![],
    };
    assert_eq!(suggest_pathway(&crisis), Pathway::High);

    let intense = SuggestionSignals {
        intensity: Some(9),
        ..Default::default()
    };
    assert_eq!(suggest_pathway(&intense), Pathway::High);

    let moderate = SuggestionSignals {
        intensity: Some(6),
        ..Default::default()
    };
    assert_eq!(suggest_pathway(&moderate), Pathway::Mid);

    let frantic = SuggestionSignals {
        intensity: Some(2),
        indicators: vec!["rapid_messaging".to_string()],
        ..Default::default()
    };
    assert_eq!(suggest_pathway(&frantic), Pathway::Mid);

    assert_eq!(suggest_pathway(&SuggestionSignals::default()), Pathway::Low);
}

#[tokio::test]
async fn test_manager_applies_suggestion_then_holds_during_cooldown() {
    let manager = PathwayManager::new(Duration::seconds(30));

    let signals = SuggestionSignals {
        intensity: Some(6),
        ..Default::default()
    };
    let (suggested, decision) = manager.suggest("s-1", &signals).await;
    assert_eq!(suggested, Pathway::Mid);
    assert!(decision.allowed);

    // An immediate calm-down suggestion lands inside the cooldown.
    let calm = SuggestionSignals {
        intensity: Some(1),
        ..Default::default()
    };
    let (_, decision) = manager.suggest("s-1", &calm).await;
    assert!(!decision.allowed);
    assert_eq!(manager.current("s-1").await.current, Pathway::Mid);

    // But a crisis still escalates straight through it.
    let decision = manager.escalate("s-1").await;
    assert!(decision.allowed);
    assert_eq!(manager.current("s-1").await.current, Pathway::High);
}

#[tokio::test]
async fn test_recommendations_rank_by_recorded_success() {
    let manager = PathwayManager::default();
    manager.escalate("s-2").await;

    let actions = pathway_profile(Pathway::High).actions;
    let last = actions[actions.len() - 1];

    // Make the statically-last tool the clear personal favourite.
    manager.record_tool_outcome("s-2", last, true).await;
    manager.record_tool_outcome("s-2", last, true).await;

    let recs = manager.recommendations("s-2").await;
    assert_eq!(recs[0].tool, last);
    assert_eq!(recs[0].attempts, 2);
    assert!(recs[0].success_rate > recs[1].success_rate);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let manager = PathwayManager::default();
    manager.escalate("s-3").await;
    assert_eq!(manager.current("s-3").await.current, Pathway::High);
    assert_eq!(manager.current("s-4").await.current, Pathway::Low);
}
