// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Static per-pathway presentation configuration served to the client.
//! Configuration data, not logic; the state machine never reads it.

use serde::Serialize;

use super::machine::Pathway;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreathingTechnique {
    pub name: &'static str,
    pub description: &'static str,
    pub inhale_seconds: u8,
    pub hold_seconds: u8,
    pub exhale_seconds: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathwayProfile {
    pub pathway: Pathway,
    /// UI scale factor; larger in crisis mode for reachability.
    pub ui_scale: f32,
    pub haptics_enabled: bool,
    /// 0 = still, 1 = gentle, 2 = full motion.
    pub animation_intensity: u8,
    /// Ranked action list, strongest recommendation first.
    pub actions: Vec<&'static str>,
    pub breathing: Option<BreathingTechnique>,
}

pub fn pathway_profile(pathway: Pathway) -> PathwayProfile {
    match pathway {
        Pathway::High => PathwayProfile {
            pathway,
            ui_scale: 1.3,
            haptics_enabled: true,
            animation_intensity: 0,
            actions: vec![
                "call_crisis_line",
                "text_crisis_line",
                "grounding_exercise",
                "notify_trusted_contact",
            ],
            breathing: Some(BreathingTechnique {
                name: "Physiological sigh",
                description: "Two short breaths in through the nose, one long breath out",
                inhale_seconds: 2,
                hold_seconds: 1,
                exhale_seconds: 6,
            }),
        },
        Pathway::Mid => PathwayProfile {
            pathway,
            ui_scale: 1.1,
            haptics_enabled: true,
            animation_intensity: 1,
            actions: vec![
                "breathing_exercise",
                "grounding_exercise",
                "guided_journal",
                "gentle_movement",
            ],
            breathing: Some(BreathingTechnique {
                name: "Box breathing",
                description: "Breathe in, hold, and out for an even count",
                inhale_seconds: 4,
                hold_seconds: 4,
                exhale_seconds: 4,
            }),
        },
        Pathway::Low => PathwayProfile {
            pathway,
            ui_scale: 1.0,
            haptics_enabled: false,
            animation_intensity: 2,
            actions: vec![
                "reflective_journal",
                "mood_check_in",
                "gratitude_note",
                "sleep_review",
            ],
            breathing: None,
        },
    }
}
