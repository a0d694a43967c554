// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Per-session pathway state with atomic read-modify-write.
//!
//! Each session's state sits behind its own mutex, so concurrent requests
//! for the same session serialize on the transition while different
//! sessions never contend.

use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::machine::{
    suggest_pathway, transition, Pathway, PathwayState, SuggestionSignals, TransitionDecision,
    DEFAULT_COOLDOWN,
};
use super::profiles::pathway_profile;

#[derive(Clone, Debug, Default)]
struct ToolStats {
    attempts: u32,
    successes: u32,
}

impl ToolStats {
    fn rate(&self) -> f64 {
        if self.attempts == 0 {
            // Unranked tools sit mid-table until there is history.
            0.5
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ToolRecommendation {
    pub tool: String,
    pub success_rate: f64,
    pub attempts: u32,
}

pub struct PathwayManager {
    cooldown: Duration,
    sessions: RwLock<HashMap<String, Arc<Mutex<PathwayState>>>>,
    tool_stats: RwLock<HashMap<String, HashMap<String, ToolStats>>>,
}

impl PathwayManager {
    pub fn new(cooldown: Duration) -> Self {
        PathwayManager {
            cooldown,
            sessions: RwLock::new(HashMap::new()),
            tool_stats: RwLock::new(HashMap::new()),
        }
    }

    async fn session(&self, subject_id: &str) -> Arc<Mutex<PathwayState>> {
        if let Some(state) = self.sessions.read().await.get(subject_id) {
            return state.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(subject_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(PathwayState::new(Utc::now(), self.cooldown))))
            .clone()
    }

    pub async fn current(&self, subject_id: &str) -> PathwayState {
        *self.session(subject_id).await.lock().await
    }

    /// Compute a suggestion from the signals and apply it under the
    /// session lock.
    pub async fn suggest(
        &self,
        subject_id: &str,
        signals: &SuggestionSignals,
    ) -> (Pathway, TransitionDecision) {
        let suggested = suggest_pathway(signals);
        let decision = self.apply(subject_id, suggested).await;
        (suggested, decision)
    }

    /// Apply an explicit target pathway under the session lock.
    pub async fn apply(&self, subject_id: &str, target: Pathway) -> TransitionDecision {
        let session = self.session(subject_id).await;
        let mut state = session.lock().await;
        let now = Utc::now();
        let decision = transition(state.current, target, state.last_change, now, self.cooldown);
        if decision.allowed {
            tracing::info!(
                subject = subject_id,
                from = state.current.as_str(),
                to = decision.new_state.as_str(),
                "pathway change accepted"
            );
            state.current = decision.new_state;
            state.last_change = now;
        }
        decision
    }

    /// Direct unconditional jump to HIGH.
    pub async fn escalate(&self, subject_id: &str) -> TransitionDecision {
        self.apply(subject_id, Pathway::High).await
    }

    pub async fn record_tool_outcome(&self, subject_id: &str, tool: &str, success: bool) {
        let mut stats = self.tool_stats.write().await;
        let entry = stats
            .entry(subject_id.to_string())
            .or_default()
            .entry(tool.to_string())
            .or_default();
        entry.attempts += 1;
        if success {
            entry.successes += 1;
        }
    }

    /// The current pathway's action list, ranked by the subject's recorded
    /// success rate. Unused tools keep their static position via the
    /// mid-table default and the stable sort.
    pub async fn recommendations(&self, subject_id: &str) -> Vec<ToolRecommendation> {
        let state = self.current(subject_id).await;
        let profile = pathway_profile(state.current);
        let stats = self.tool_stats.read().await;
        let subject_stats = stats.get(subject_id);

        let mut recommendations: Vec<ToolRecommendation> = profile
            .actions
            .iter()
            .map(|tool| {
                let tool_stats = subject_stats
                    .and_then(|m| m.get(*tool))
                    .cloned()
                    .unwrap_or_default();
                ToolRecommendation {
                    tool: tool.to_string(),
                    success_rate: tool_stats.rate(),
                    attempts: tool_stats.attempts,
                }
            })
            .collect();
        recommendations.sort_by(|a, b| {
            b.success_rate
                .partial_cmp(&a.success_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recommendations
    }
}

impl Default for PathwayManager {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
