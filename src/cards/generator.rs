// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Fixed, tone-controlled safety cards keyed on verdict severity.
//!
//! The wording is a content-safety requirement, not a style preference:
//! calm register, no exclamation marks, no minimizing language, no
//! diagnostic language. Generation is pure so a card is fully determined
//! by the severity that produced it.

use serde::{Deserialize, Serialize};

use crate::resources::{ResourceRef, ResourceRegistry};
use crate::safety::verdict::{SafetyVerdict, SeverityLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardTone {
    Calm,
    Urgent,
    Emergency,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalSafetyCard {
    pub title: String,
    pub message: String,
    pub tone: CardTone,
    pub primary_resource: ResourceRef,
    pub additional_resources: Vec<ResourceRef>,
    pub self_care_options: Vec<String>,
}

pub struct CardGenerator;

impl CardGenerator {
    pub fn new() -> Self {
        CardGenerator
    }

    pub fn generate(
        &self,
        verdict: &SafetyVerdict,
        registry: &ResourceRegistry,
    ) -> ClinicalSafetyCard {
        let primary = verdict
            .recommended_resources
            .first()
            .cloned()
            .unwrap_or_else(|| registry.default_crisis_resource().clone());

        match verdict.severity {
            SeverityLevel::Critical => ClinicalSafetyCard {
                title: "You deserve support right now".to_string(),
                message: "What you are going through sounds very painful. You do not \
                          have to face this alone. Please reach out to one of the \
                          services below. They are free, confidential, and available \
                          around the clock."
                    .to_string(),
                tone: CardTone::Urgent,
                primary_resource: primary,
                additional_resources: extra_resources(verdict, registry, 2),
                self_care_options: vec![
                    "Stay with someone you trust, or let them know how you feel".to_string(),
                    "Move to a place where you feel safer".to_string(),
                ],
            },
            SeverityLevel::High => ClinicalSafetyCard {
                title: "Support is available".to_string(),
                message: "It sounds like things are really heavy at the moment. Talking \
                          to someone who is trained to listen can help. The contacts \
                          below are free and confidential."
                    .to_string(),
                tone: CardTone::Calm,
                primary_resource: primary,
                additional_resources: extra_resources(verdict, registry, 1),
                self_care_options: vec![
                    "Try a slow breathing exercise for a few minutes".to_string(),
                    "Reach out to a friend or family member".to_string(),
                    "Write down what is weighing on you".to_string(),
                ],
            },
            _ => ClinicalSafetyCard {
                title: "Looking after yourself".to_string(),
                message: "Thank you for sharing how you are feeling. If you would like \
                          to talk things through with someone, the contact below is a \
                          good place to start."
                    .to_string(),
                tone: CardTone::Calm,
                primary_resource: primary,
                additional_resources: Vec::new(),
                self_care_options: vec![
                    "Take a short walk or step outside".to_string(),
                    "Note one small thing that went well today".to_string(),
                ],
            },
        }
    }
}

impl Default for CardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resources beyond the primary, topped up from the registry ranking when
/// the verdict carried fewer than requested.
fn extra_resources(
    verdict: &SafetyVerdict,
    registry: &ResourceRegistry,
    count: usize,
) -> Vec<ResourceRef> {
    let primary_id = verdict
        .recommended_resources
        .first()
        .map(|r| r.id.clone())
        .unwrap_or_else(|| registry.default_crisis_resource().id.clone());

    let mut extras: Vec<ResourceRef> = verdict
        .recommended_resources
        .iter()
        .skip(1)
        .cloned()
        .collect();
    for candidate in registry.all() {
        if extras.len() >= count {
            break;
        }
        if candidate.id != primary_id && !extras.iter().any(|r| r.id == candidate.id) {
            extras.push(candidate.clone());
        }
    }
    extras.truncate(count);
    extras
}
