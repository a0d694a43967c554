// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Dual-gate orchestration: keyword gate first, intent classifier only
//! when the keyword gate is not confident, strictness-preserving merge.
//!
//! Collaborators are constructor-injected; the process entry point owns
//! their lifecycles so tests can swap in fakes.

use std::sync::Arc;

use crate::cards::{CardGenerator, ClinicalSafetyCard};
use crate::hazard::{HazardLogger, LogHandle};
use crate::monitoring::{AlertLevel, OpsAlertChannel};
use crate::redaction::Redactor;
use crate::resources::ResourceRegistry;
use crate::safety::intent_gate::IntentGate;
use crate::safety::keyword_gate::{KeywordGate, CERTAINTY_THRESHOLD};
use crate::safety::verdict::{SafetyVerdict, TriggerKind};

/// Result of a full checked-and-logged evaluation, ready for the API layer.
#[derive(Clone, Debug)]
pub struct SafetyCheckOutcome {
    pub verdict: SafetyVerdict,
    pub card: Option<ClinicalSafetyCard>,
    pub log: Option<LogHandle>,
    pub degraded: bool,
}

pub struct SafetyOrchestrator {
    redactor: Redactor,
    keyword_gate: KeywordGate,
    intent_gate: IntentGate,
    card_generator: CardGenerator,
    registry: Arc<ResourceRegistry>,
    logger: Arc<HazardLogger>,
    alerts: OpsAlertChannel,
    certainty_threshold: f64,
}

impl SafetyOrchestrator {
    pub fn new(
        redactor: Redactor,
        intent_gate: IntentGate,
        registry: Arc<ResourceRegistry>,
        logger: Arc<HazardLogger>,
        alerts: OpsAlertChannel,
    ) -> Self {
        SafetyOrchestrator {
            redactor,
            keyword_gate: KeywordGate::new(),
            intent_gate,
            card_generator: CardGenerator::new(),
            registry,
            logger,
            alerts,
            certainty_threshold: CERTAINTY_THRESHOLD,
        }
    }

    pub fn with_certainty_threshold(mut self, threshold: f64) -> Self {
        self.certainty_threshold = threshold;
        self
    }

    /// Keyword gate only. Bounded, no external dependency; the mode used
    /// when latency is paramount.
    pub fn quick_check(&self, text: &str) -> SafetyVerdict {
        self.keyword_gate.check(text, &self.registry)
    }

    /// Full dual-gate evaluation. The keyword verdict is authoritative at
    /// or above the certainty threshold; high-confidence deterministic
    /// matches are not second-guessed by a probabilistic system.
    pub async fn evaluate(&self, text: &str) -> (SafetyVerdict, bool) {
        let keyword_verdict = self.keyword_gate.check(text, &self.registry);
        if keyword_verdict.confidence >= self.certainty_threshold {
            return (keyword_verdict, false);
        }

        // Redaction before the text may cross the process boundary.
        let redaction = self.redactor.redact(text);
        let outcome = self
            .intent_gate
            .classify(&redaction.redacted_text, &self.registry)
            .await;
        let degraded = outcome.is_degraded();
        if degraded {
            self.alerts.raise(
                AlertLevel::Warning,
                "safety_orchestrator",
                "intent gate degraded, merged verdict flagged for human review".to_string(),
            );
        }

        let merged = merge_verdicts(&keyword_verdict, outcome.verdict(), &self.registry);
        (merged, degraded)
    }

    /// Evaluate, write the audit entry, and build the card. Hazard logging
    /// happens before this function returns the outcome to the caller, so
    /// the log-then-respond ordering holds for every unsafe verdict.
    pub async fn check_message(
        &self,
        text: &str,
        subject_id: &str,
        quick_check_only: bool,
    ) -> SafetyCheckOutcome {
        let (verdict, degraded) = if quick_check_only {
            (self.quick_check(text), false)
        } else {
            self.evaluate(text).await
        };

        let card = if verdict.requires_clinical_card {
            Some(self.card_generator.generate(&verdict, &self.registry))
        } else {
            None
        };

        let log = if !verdict.is_safe || verdict.requires_human_review {
            let handle = self
                .logger
                .record(subject_id, &verdict, actions_for(&verdict), card.is_some())
                .await;
            Some(handle)
        } else {
            None
        };

        SafetyCheckOutcome {
            verdict,
            card,
            log,
            degraded,
        }
    }
}

/// Merge two gate verdicts without ever weakening either one.
///
/// Severity takes the maximum under the Low < Medium < High < Critical
/// ordering; the kill, card, and review flags are ORed; and a keyword hit
/// is never silently discarded even when the classifier disagrees - the
/// merged verdict keeps at least one recommended resource.
pub fn merge_verdicts(
    keyword: &SafetyVerdict,
    model: &SafetyVerdict,
    registry: &ResourceRegistry,
) -> SafetyVerdict {
    let keyword_wins = keyword.severity >= model.severity;
    let severity = keyword.severity.max(model.severity);
    let (trigger, confidence) = if keyword_wins {
        (keyword.trigger, keyword.confidence)
    } else {
        (model.trigger, model.confidence)
    };

    let mut signals = keyword.matched_signals.clone();
    signals.extend(model.matched_signals.iter().cloned());

    let mut resources = keyword.recommended_resources.clone();
    for resource in &model.recommended_resources {
        if !resources.iter().any(|r| r.id == resource.id) {
            resources.push(resource.clone());
        }
    }
    let keyword_matched = !keyword.matched_signals.is_empty();
    if resources.is_empty() && keyword_matched {
        resources.push(registry.default_crisis_resource().clone());
    }

    let trigger = if keyword_matched && trigger == TriggerKind::None {
        TriggerKind::Keyword
    } else {
        trigger
    };

    SafetyVerdict {
        is_safe: keyword.is_safe && model.is_safe,
        should_kill_session: keyword.should_kill_session || model.should_kill_session,
        severity,
        trigger,
        matched_signals: signals,
        confidence,
        recommended_resources: resources,
        requires_clinical_card: keyword.requires_clinical_card || model.requires_clinical_card,
        requires_human_review: keyword.requires_human_review || model.requires_human_review,
    }
}

fn actions_for(verdict: &SafetyVerdict) -> Vec<String> {
    let mut actions = Vec::new();
    if verdict.should_kill_session {
        actions.push("kill_session".to_string());
    }
    if verdict.requires_clinical_card {
        actions.push("show_safety_card".to_string());
    }
    if !verdict.recommended_resources.is_empty() {
        actions.push("offer_resources".to_string());
    }
    if verdict.requires_human_review {
        actions.push("flag_for_human_review".to_string());
    }
    actions
}
