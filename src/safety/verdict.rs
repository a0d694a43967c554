// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Verdict value objects shared by both gates and the orchestrator.

use crate::resources::ResourceRef;
use serde::{Deserialize, Serialize};

/// Total severity order used by the merge rule: Low < Medium < High <
/// Critical. The derived `Ord` is the single source of that ordering.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "LOW",
            SeverityLevel::Medium => "MEDIUM",
            SeverityLevel::High => "HIGH",
            SeverityLevel::Critical => "CRITICAL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerKind {
    Keyword,
    ModelIntent,
    None,
}

/// Immutable output of a safety evaluation. Gates and the orchestrator
/// build fresh verdicts; nothing mutates one after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    pub should_kill_session: bool,
    pub severity: SeverityLevel,
    pub trigger: TriggerKind,
    pub matched_signals: Vec<String>,
    pub confidence: f64,
    pub recommended_resources: Vec<ResourceRef>,
    pub requires_clinical_card: bool,
    pub requires_human_review: bool,
}

impl SafetyVerdict {
    /// A fully safe verdict: no trigger, nothing to show.
    pub fn safe() -> Self {
        SafetyVerdict {
            is_safe: true,
            should_kill_session: false,
            severity: SeverityLevel::Low,
            trigger: TriggerKind::None,
            matched_signals: Vec::new(),
            confidence: 1.0,
            recommended_resources: Vec::new(),
            requires_clinical_card: false,
            requires_human_review: false,
        }
    }

    /// An unsafe verdict at the given severity. Critical always implies a
    /// killed session and a clinical card; callers cannot weaken that.
    pub fn unsafe_at(severity: SeverityLevel, trigger: TriggerKind, confidence: f64) -> Self {
        let critical = severity == SeverityLevel::Critical;
        SafetyVerdict {
            is_safe: false,
            should_kill_session: critical,
            severity,
            trigger,
            matched_signals: Vec::new(),
            confidence,
            recommended_resources: Vec::new(),
            requires_clinical_card: critical,
            requires_human_review: false,
        }
    }

    pub fn with_kill_session(mut self) -> Self {
        self.should_kill_session = true;
        self
    }

    pub fn with_clinical_card(mut self) -> Self {
        self.requires_clinical_card = true;
        self
    }

    pub fn with_human_review(mut self) -> Self {
        self.requires_human_review = true;
        self
    }

    pub fn with_signals(mut self, signals: Vec<String>) -> Self {
        self.matched_signals = signals;
        self
    }

    pub fn with_resources(mut self, resources: Vec<ResourceRef>) -> Self {
        self.recommended_resources = resources;
        self
    }
}
