// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod intent_gate;
pub mod keyword_gate;
pub mod orchestrator;
pub mod verdict;

pub use intent_gate::{
    DisabledIntentProvider, GateOutcome, HostedIntentProvider, HostedProviderConfig,
    IntentClassification, IntentError, IntentGate, IntentLabel, IntentProvider,
};
pub use keyword_gate::{KeywordGate, CERTAINTY_THRESHOLD};
pub use orchestrator::{merge_verdicts, SafetyCheckOutcome, SafetyOrchestrator};
pub use verdict::{SafetyVerdict, SeverityLevel, TriggerKind};
