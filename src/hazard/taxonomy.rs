// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Static hazard taxonomy attached to audit exports so a regulatory
//! reviewer can read entries against the catalogued risk categories.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HazardCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mitigation: &'static str,
}

pub fn hazard_taxonomy() -> Vec<HazardCategory> {
    vec![
        HazardCategory {
            id: "suicidal-ideation",
            name: "Suicidal ideation",
            description: "Direct self-harm or suicide language, including method references",
            mitigation: "Session ended, clinical safety card shown, crisis contacts offered",
        },
        HazardCategory {
            id: "self-harm-risk",
            name: "Self-harm risk",
            description: "Ideation signals without a direct method reference",
            mitigation: "Session ended or resources attached depending on signal count",
        },
        HazardCategory {
            id: "medical-advice",
            name: "Medical advice seeking",
            description: "Requests for diagnosis, prescription, or dosage guidance",
            mitigation: "Redirected to a medical contact; no advice generated",
        },
        HazardCategory {
            id: "classifier-outage",
            name: "Classifier outage",
            description: "Intent classifier unreachable, timed out, or off-contract",
            mitigation: "Degraded cautious verdict, human review flagged, operators alerted",
        },
        HazardCategory {
            id: "banned-content",
            name: "Banned content rewrite",
            description: "AI-generated reply contained minimizing, diagnostic, or dismissive language",
            mitigation: "Offending sentences replaced before delivery",
        },
    ]
}
