// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic phrase gate. No I/O, no allocation beyond the verdict;
//! this is the latency floor for every safety check.

use crate::resources::ResourceRegistry;
use crate::safety::verdict::{SafetyVerdict, SeverityLevel, TriggerKind};

/// Direct self-harm or suicide language, including method references.
/// Any single hit is treated as an emergency.
const EMERGENCY_TIER: &[&str] = &[
    "kill myself",
    "end my life",
    "take my own life",
    "want to die",
    "suicide",
    "suicidal",
    "self harm",
    "self-harm",
    "hurt myself",
    "cut myself",
    "overdose",
    "jump off",
    "hang myself",
    "no reason to live",
    "better off dead",
];

/// Ideation without a direct method reference. One hit is ambiguous and
/// defers to the classifier; two or more are treated as high risk.
const HIGH_RISK_TIER: &[&str] = &[
    "hopeless",
    "worthless",
    "can't go on",
    "cant go on",
    "give up",
    "giving up",
    "no way out",
    "trapped",
    "unbearable",
    "everyone would be better without me",
    "burden to everyone",
    "nothing matters anymore",
    "can't take it anymore",
    "cant take it anymore",
];

/// Requests this product must redirect to a medical professional rather
/// than answer.
const MEDICAL_TIER: &[&str] = &[
    "medication dosage",
    "stop taking my medication",
    "stop my medication",
    "should i take",
    "prescribe",
    "prescription",
    "diagnose me",
    "do i have depression",
    "do i have bipolar",
    "withdrawal symptoms",
];

/// Confidence at or above which the orchestrator treats this gate's
/// verdict as authoritative and skips the classifier.
pub const CERTAINTY_THRESHOLD: f64 = 0.9;

pub struct KeywordGate;

impl KeywordGate {
    pub fn new() -> Self {
        KeywordGate
    }

    /// Scan `text` against the three ranked tiers and produce a verdict.
    ///
    /// A single high-risk hit is deliberately provisional (confidence 0.6,
    /// below [`CERTAINTY_THRESHOLD`]) so the orchestrator consults the
    /// intent classifier before deciding.
    pub fn check(&self, text: &str, registry: &ResourceRegistry) -> SafetyVerdict {
        let lowered = text.to_lowercase();

        let emergency = matches_in(&lowered, EMERGENCY_TIER, "emergency");
        if !emergency.is_empty() {
            return SafetyVerdict::unsafe_at(SeverityLevel::Critical, TriggerKind::Keyword, 1.0)
                .with_signals(emergency)
                .with_resources(registry.top(3));
        }

        let high_risk = matches_in(&lowered, HIGH_RISK_TIER, "high_risk");
        if high_risk.len() >= 2 {
            return SafetyVerdict::unsafe_at(SeverityLevel::High, TriggerKind::Keyword, 0.9)
                .with_kill_session()
                .with_clinical_card()
                .with_signals(high_risk)
                .with_resources(registry.top(2));
        }
        if high_risk.len() == 1 {
            return SafetyVerdict::unsafe_at(SeverityLevel::Medium, TriggerKind::Keyword, 0.6)
                .with_signals(high_risk)
                .with_resources(vec![registry.default_crisis_resource().clone()]);
        }

        let medical = matches_in(&lowered, MEDICAL_TIER, "medical");
        if !medical.is_empty() {
            let mut verdict = SafetyVerdict::safe();
            verdict.severity = SeverityLevel::Low;
            verdict.trigger = TriggerKind::Keyword;
            verdict.confidence = 0.8;
            verdict.matched_signals = medical;
            verdict.recommended_resources = vec![registry.medical_resource().clone()];
            return verdict;
        }

        SafetyVerdict::safe()
    }
}

impl Default for KeywordGate {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_in(lowered: &str, tier: &[&str], tier_name: &str) -> Vec<String> {
    tier.iter()
        .filter(|phrase| lowered.contains(*phrase))
        .map(|phrase| format!("{}:{}", tier_name, phrase))
        .collect()
}
