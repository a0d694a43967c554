// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Request/response types for the HTTP surface, and the deterministic
//! verdict-to-action derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::ClinicalSafetyCard;
use crate::pathway::{Pathway, ToolRecommendation};
use crate::resources::ResourceRef;
use crate::safety::{SafetyVerdict, SeverityLevel};

pub const MAX_TEXT_LENGTH: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SafetyCheckRequest {
    pub text: String,
    pub subject_id: Option<String>,
    #[serde(default)]
    pub quick_check_only: bool,
}

/// Deterministic user-facing action derived from a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyAction {
    Continue,
    ShowResources,
    ShowSafetyCard,
    KillSession,
}

impl SafetyAction {
    pub fn derive(verdict: &SafetyVerdict) -> Self {
        if verdict.should_kill_session {
            SafetyAction::KillSession
        } else if verdict.requires_clinical_card {
            SafetyAction::ShowSafetyCard
        } else if !verdict.is_safe {
            SafetyAction::ShowResources
        } else {
            SafetyAction::Continue
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetyCheckResponse {
    pub safe: bool,
    pub severity: SeverityLevel,
    pub action: SafetyAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_card: Option<ClinicalSafetyCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceRef>,
    pub requires_human_review: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathwayUpdateRequest {
    pub subject_id: String,
    pub action: PathwayRequestAction,
    pub intensity: Option<u8>,
    #[serde(default)]
    pub recent_crisis: bool,
    #[serde(default)]
    pub indicators: Vec<String>,
    /// Target for `set`; ignored for the other actions.
    pub pathway: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathwayRequestAction {
    Suggest,
    Set,
    Escalate,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathwayUpdateResponse {
    pub subject_id: String,
    pub pathway: Pathway,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<Pathway>,
}

/// Outcome report for a pathway tool the subject tried, fed back into
/// the per-session recommendation ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolOutcomeRequest {
    pub tool: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcomeResponse {
    pub subject_id: String,
    pub recommendations: Vec<ToolRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionPathwayResponse {
    pub subject_id: String,
    pub pathway: Pathway,
    pub since: DateTime<Utc>,
    pub recommendations: Vec<ToolRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenReplyRequest {
    pub text: String,
    pub subject_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenReplyResponse {
    pub text: String,
    pub rewritten: bool,
    pub violations: Vec<String>,
}
