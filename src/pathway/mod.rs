// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod machine;
pub mod manager;
pub mod profiles;

pub use machine::{
    suggest_pathway, transition, Pathway, PathwayState, SuggestionSignals, TransitionDecision,
    DEFAULT_COOLDOWN,
};
pub use manager::{PathwayManager, ToolRecommendation};
pub use profiles::{pathway_profile, BreathingTechnique, PathwayProfile};
