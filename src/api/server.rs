// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Service facade behind the HTTP handlers. Owns the orchestrator, the
//! pathway manager, and the audit surfaces; constructed once at startup
//! with its collaborators injected.

use chrono::Utc;
use std::sync::Arc;

use super::errors::ApiError;
use super::handlers::{
    HealthResponse, PathwayRequestAction, PathwayUpdateRequest, PathwayUpdateResponse,
    SafetyAction, SafetyCheckRequest, SafetyCheckResponse, ScreenReplyRequest,
    ScreenReplyResponse, SessionPathwayResponse, ToolOutcomeRequest, ToolOutcomeResponse,
    MAX_TEXT_LENGTH,
};
use crate::cards::BannedPhraseScreen;
use crate::hazard::{AuditExport, HazardLogger};
use crate::pathway::{pathway_profile, Pathway, PathwayManager, PathwayProfile, SuggestionSignals};
use crate::resources::ResourceRegistry;
use crate::safety::verdict::{SafetyVerdict, SeverityLevel, TriggerKind};
use crate::safety::SafetyOrchestrator;

pub struct ApiServer {
    orchestrator: SafetyOrchestrator,
    pathways: PathwayManager,
    logger: Arc<HazardLogger>,
    registry: Arc<ResourceRegistry>,
    screen: BannedPhraseScreen,
}

impl ApiServer {
    pub fn new(
        orchestrator: SafetyOrchestrator,
        pathways: PathwayManager,
        logger: Arc<HazardLogger>,
        registry: Arc<ResourceRegistry>,
    ) -> Self {
        ApiServer {
            orchestrator,
            pathways,
            logger,
            registry,
            screen: BannedPhraseScreen::new(),
        }
    }

    pub fn health_check(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            version: crate::version::VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub async fn safety_check(
        &self,
        request: SafetyCheckRequest,
    ) -> Result<SafetyCheckResponse, ApiError> {
        if request.text.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "text".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if request.text.len() > MAX_TEXT_LENGTH {
            return Err(ApiError::ValidationError {
                field: "text".to_string(),
                message: format!("must be at most {} bytes", MAX_TEXT_LENGTH),
            });
        }

        let subject_id = request.subject_id.as_deref().unwrap_or("anonymous");
        let outcome = self
            .orchestrator
            .check_message(&request.text, subject_id, request.quick_check_only)
            .await;

        Ok(SafetyCheckResponse {
            safe: outcome.verdict.is_safe,
            severity: outcome.verdict.severity,
            action: SafetyAction::derive(&outcome.verdict),
            safety_card: outcome.card,
            resources: outcome.verdict.recommended_resources.clone(),
            requires_human_review: outcome.verdict.requires_human_review,
            timestamp: Utc::now(),
        })
    }

    pub fn pathway_profile_by_name(&self, name: &str) -> Result<PathwayProfile, ApiError> {
        Pathway::parse(name)
            .map(pathway_profile)
            .ok_or_else(|| ApiError::NotFound(format!("unknown pathway '{}'", name)))
    }

    pub async fn session_pathway(&self, subject_id: &str) -> SessionPathwayResponse {
        let state = self.pathways.current(subject_id).await;
        SessionPathwayResponse {
            subject_id: subject_id.to_string(),
            pathway: state.current,
            since: state.last_change,
            recommendations: self.pathways.recommendations(subject_id).await,
        }
    }

    pub async fn update_pathway(
        &self,
        request: PathwayUpdateRequest,
    ) -> Result<PathwayUpdateResponse, ApiError> {
        if request.subject_id.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "subject_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(intensity) = request.intensity {
            if !(1..=10).contains(&intensity) {
                return Err(ApiError::ValidationError {
                    field: "intensity".to_string(),
                    message: "must be between 1 and 10".to_string(),
                });
            }
        }

        let (suggested, decision) = match request.action {
            PathwayRequestAction::Suggest => {
                let signals = SuggestionSignals {
                    intensity: request.intensity,
                    recent_crisis: request.recent_crisis,
                    indicators: request.indicators.clone(),
                };
                let (suggested, decision) =
                    self.pathways.suggest(&request.subject_id, &signals).await;
                (Some(suggested), decision)
            }
            PathwayRequestAction::Set => {
                let name = request.pathway.as_deref().ok_or_else(|| {
                    ApiError::ValidationError {
                        field: "pathway".to_string(),
                        message: "required when action is 'set'".to_string(),
                    }
                })?;
                let target = Pathway::parse(name).ok_or_else(|| ApiError::ValidationError {
                    field: "pathway".to_string(),
                    message: format!("unknown pathway '{}'", name),
                })?;
                (None, self.pathways.apply(&request.subject_id, target).await)
            }
            PathwayRequestAction::Escalate => {
                (None, self.pathways.escalate(&request.subject_id).await)
            }
        };

        Ok(PathwayUpdateResponse {
            subject_id: request.subject_id,
            pathway: decision.new_state,
            allowed: decision.allowed,
            message: decision.message.map(str::to_string),
            suggested,
        })
    }

    /// Record how a recommended tool worked out for this subject and return
    /// the re-ranked recommendations.
    pub async fn record_tool_outcome(
        &self,
        subject_id: &str,
        request: ToolOutcomeRequest,
    ) -> Result<ToolOutcomeResponse, ApiError> {
        if subject_id.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "subject_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if request.tool.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "tool".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        self.pathways
            .record_tool_outcome(subject_id, &request.tool, request.success)
            .await;

        Ok(ToolOutcomeResponse {
            subject_id: subject_id.to_string(),
            recommendations: self.pathways.recommendations(subject_id).await,
        })
    }

    /// Screen a downstream AI-generated reply against the banned-phrase
    /// policy. A rewrite is itself a hazard-loggable event.
    pub async fn screen_reply(
        &self,
        request: ScreenReplyRequest,
    ) -> Result<ScreenReplyResponse, ApiError> {
        if request.text.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "text".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let outcome = self.screen.screen(&request.text);
        if outcome.rewritten {
            let subject_id = request.subject_id.as_deref().unwrap_or("anonymous");
            let verdict =
                SafetyVerdict::unsafe_at(SeverityLevel::Low, TriggerKind::None, 1.0).with_signals(
                    outcome
                        .violations
                        .iter()
                        .map(|v| format!("banned:{}", v))
                        .collect(),
                );
            self.logger
                .record(
                    subject_id,
                    &verdict,
                    vec!["rewrite_generated_reply".to_string()],
                    false,
                )
                .await;
        }

        Ok(ScreenReplyResponse {
            text: outcome.text,
            rewritten: outcome.rewritten,
            violations: outcome.violations,
        })
    }

    pub async fn audit_export(&self) -> Result<AuditExport, ApiError> {
        self.logger
            .export_for_audit()
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }
}
