// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Three-state session pathway machine.
//!
//! One hard rule with no exception: escalation to HIGH is always allowed,
//! cooldown or not. Under-reacting to an escalation signal is the least
//! acceptable failure mode of the whole system. Every other change is
//! blocked while the cooldown is running to stop UI thrashing from noisy
//! signals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COOLDOWN: Duration = Duration::seconds(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pathway {
    High,
    Mid,
    Low,
}

impl Pathway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::High => "HIGH",
            Pathway::Mid => "MID",
            Pathway::Low => "LOW",
        }
    }

    pub fn parse(name: &str) -> Option<Pathway> {
        match name.to_uppercase().as_str() {
            "HIGH" => Some(Pathway::High),
            "MID" => Some(Pathway::Mid),
            "LOW" => Some(Pathway::Low),
            _ => None,
        }
    }
}

/// Per-session state. Created at session start defaulting to LOW; mutated
/// only through [`transition`]; never deleted, only superseded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathwayState {
    pub current: Pathway,
    pub last_change: DateTime<Utc>,
}

impl PathwayState {
    /// The cooldown gates time since the last accepted change. A fresh
    /// session has no prior change, so the clock is backdated past the
    /// cooldown and the first transition is never throttled.
    pub fn new(now: DateTime<Utc>, cooldown: Duration) -> Self {
        PathwayState {
            current: Pathway::Low,
            last_change: now - cooldown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionDecision {
    pub new_state: Pathway,
    pub allowed: bool,
    /// Presentation-continuity message for accepted changes. Not used for
    /// logic.
    pub message: Option<&'static str>,
}

/// The transition function. Pure; callers are responsible for applying the
/// decision atomically per session.
pub fn transition(
    current: Pathway,
    suggested: Pathway,
    last_change: DateTime<Utc>,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> TransitionDecision {
    if suggested == current {
        return TransitionDecision {
            new_state: current,
            allowed: false,
            message: None,
        };
    }

    // Escalation to HIGH bypasses the cooldown unconditionally.
    if suggested != Pathway::High && now - last_change < cooldown {
        return TransitionDecision {
            new_state: current,
            allowed: false,
            message: None,
        };
    }

    TransitionDecision {
        new_state: suggested,
        allowed: true,
        message: Some(transition_message(current, suggested)),
    }
}

/// Fixed per-(from,to) message shown when a change is accepted.
fn transition_message(from: Pathway, to: Pathway) -> &'static str {
    match (from, to) {
        (Pathway::Low, Pathway::Mid) | (Pathway::High, Pathway::Mid) => {
            "Let's slow things down together for a moment."
        }
        (Pathway::Low, Pathway::High) | (Pathway::Mid, Pathway::High) => {
            "We're here with you. Let's focus on right now."
        }
        (Pathway::Mid, Pathway::Low) | (Pathway::High, Pathway::Low) => {
            "Whenever you're ready, we can pick up where you left off."
        }
        // Same-state pairs never reach here; transition() filters them.
        _ => "",
    }
}

/// Inputs to the independent pathway suggestion.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SuggestionSignals {
    /// Explicit self-report, 1-10.
    pub intensity: Option<u8>,
    pub recent_crisis: bool,
    /// Interaction-pattern indicators from the client, e.g. "erratic".
    pub indicators: Vec<String>,
}

/// Compute a suggested pathway from self-report and interaction signals.
/// A recent-crisis flag dominates everything else.
pub fn suggest_pathway(signals: &SuggestionSignals) -> Pathway {
    if signals.recent_crisis {
        return Pathway::High;
    }
    if let Some(intensity) = signals.intensity {
        if intensity >= 8 {
            return Pathway::High;
        }
        if intensity >= 5 {
            return Pathway::Mid;
        }
    }
    let frantic = signals
        .indicators
        .iter()
        .any(|i| matches!(i.as_str(), "erratic" | "frantic" | "rapid_messaging"));
    if frantic {
        return Pathway::Mid;
    }
    Pathway::Low
}
