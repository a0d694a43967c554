// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cards;
pub mod config;
pub mod hazard;
pub mod monitoring;
pub mod pathway;
pub mod redaction;
pub mod resources;
pub mod safety;
pub mod version;

// Re-export main types from the safety pipeline
pub use redaction::{RedactionConfig, RedactionOutcome, Redactor};
pub use safety::{
    merge_verdicts, GateOutcome, HostedIntentProvider, HostedProviderConfig, IntentGate,
    IntentLabel, IntentProvider, KeywordGate, SafetyCheckOutcome, SafetyOrchestrator,
    SafetyVerdict, SeverityLevel, TriggerKind, CERTAINTY_THRESHOLD,
};

// Re-export types from the supporting modules
pub use api::{ApiServer, SafetyAction, SafetyCheckRequest, SafetyCheckResponse};
pub use cards::{BannedPhraseScreen, CardGenerator, CardTone, ClinicalSafetyCard};
pub use config::Settings;
pub use hazard::{
    hazard_taxonomy, AuditExport, HazardLogEntry, HazardLogger, HazardSink, JsonlHazardSink,
    LogHandle, MemoryHazardSink,
};
pub use monitoring::{AlertLevel, OpsAlert, OpsAlertChannel};
pub use pathway::{
    pathway_profile, suggest_pathway, transition, Pathway, PathwayManager, PathwayProfile,
    PathwayState, SuggestionSignals, TransitionDecision,
};
pub use resources::{ContactChannel, ResourceRef, ResourceRegistry};
