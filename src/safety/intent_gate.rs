// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Probabilistic second gate backed by a hosted short-text classifier.
//!
//! Invoked only when the keyword gate is not confident. The instruction
//! sent to the model is classification-only and temperature-minimized; the
//! model is never allowed to produce free-form advice. On any failure the
//! gate fails closed: a `Degraded` outcome that does not block the user
//! but flags the message for human review and attaches a crisis contact.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::resources::ResourceRegistry;
use crate::safety::verdict::{SafetyVerdict, SeverityLevel, TriggerKind};

const CLASSIFIER_INSTRUCTION: &str = "You are a safety triage classifier for a mental-wellness \
     application. Classify the user message into exactly one label: SAFE, SELF_HARM, \
     MEDICAL_ADVICE, or CRISIS. Respond with only the label followed by a confidence \
     between 0 and 1, for example: \"SELF_HARM 0.82\". Do not add any other words.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentLabel {
    Safe,
    SelfHarm,
    MedicalAdvice,
    Crisis,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntentClassification {
    pub label: IntentLabel,
    pub confidence: f64,
}

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("classifier request failed: {0}")]
    Transport(String),
    #[error("classifier timed out after {0:?}")]
    Timeout(Duration),
    #[error("unparseable classifier response: {0:?}")]
    Unparseable(String),
    #[error("classifier endpoint not configured")]
    NotConfigured,
}

/// External short-text classification capability. Mock implementations in
/// tests stand in for the hosted model.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    async fn classify_intent(&self, text: &str) -> Result<IntentClassification, IntentError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Outcome of the gate. `Degraded` is deliberately a distinct variant
/// rather than an error: callers must handle it as a verdict, not as a
/// failure path they might accidentally swallow.
#[derive(Clone, Debug, PartialEq)]
pub enum GateOutcome {
    Classified(SafetyVerdict),
    Degraded(SafetyVerdict),
}

impl GateOutcome {
    pub fn verdict(&self) -> &SafetyVerdict {
        match self {
            GateOutcome::Classified(v) | GateOutcome::Degraded(v) => v,
        }
    }

    pub fn into_verdict(self) -> SafetyVerdict {
        match self {
            GateOutcome::Classified(v) | GateOutcome::Degraded(v) => v,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, GateOutcome::Degraded(_))
    }
}

pub struct IntentGate {
    provider: std::sync::Arc<dyn IntentProvider>,
    timeout: Duration,
}

impl IntentGate {
    pub fn new(provider: std::sync::Arc<dyn IntentProvider>, timeout: Duration) -> Self {
        IntentGate { provider, timeout }
    }

    /// Classify already-redacted text. Never returns an error: infrastructure
    /// failure becomes a `Degraded` outcome per the fail-closed policy.
    pub async fn classify(&self, redacted_text: &str, registry: &ResourceRegistry) -> GateOutcome {
        match self.classify_with_retry(redacted_text).await {
            Ok(classification) => {
                GateOutcome::Classified(map_classification(classification, registry))
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %err,
                    "intent classifier unavailable, degrading to cautious verdict"
                );
                GateOutcome::Degraded(degraded_verdict(registry))
            }
        }
    }

    /// One attempt, then a single retry with whatever is left of the
    /// aggregate budget. A hung classifier therefore never holds a request
    /// past `self.timeout` in total.
    async fn classify_with_retry(&self, text: &str) -> Result<IntentClassification, IntentError> {
        let started = tokio::time::Instant::now();
        match self.attempt(text, self.timeout * 2 / 3).await {
            Ok(c) => Ok(c),
            Err(first) => {
                tracing::debug!(error = %first, "intent classification retrying once");
                let remaining = self.timeout.saturating_sub(started.elapsed());
                self.attempt(text, remaining).await
            }
        }
    }

    async fn attempt(
        &self,
        text: &str,
        budget: Duration,
    ) -> Result<IntentClassification, IntentError> {
        tokio::time::timeout(budget, self.provider.classify_intent(text))
            .await
            .map_err(|_| IntentError::Timeout(budget))?
    }
}

fn map_classification(
    classification: IntentClassification,
    registry: &ResourceRegistry,
) -> SafetyVerdict {
    let confidence = classification.confidence.clamp(0.0, 1.0);
    match classification.label {
        IntentLabel::Crisis => {
            SafetyVerdict::unsafe_at(SeverityLevel::Critical, TriggerKind::ModelIntent, confidence)
                .with_signals(vec!["model:crisis".to_string()])
                .with_resources(registry.top(3))
        }
        IntentLabel::SelfHarm => {
            SafetyVerdict::unsafe_at(SeverityLevel::High, TriggerKind::ModelIntent, confidence)
                .with_kill_session()
                .with_clinical_card()
                .with_signals(vec!["model:self_harm".to_string()])
                .with_resources(registry.top(2))
        }
        IntentLabel::MedicalAdvice => {
            let mut verdict = SafetyVerdict::safe();
            verdict.severity = SeverityLevel::Low;
            verdict.trigger = TriggerKind::ModelIntent;
            verdict.confidence = confidence;
            verdict.matched_signals = vec!["model:medical_advice".to_string()];
            verdict.recommended_resources = vec![registry.medical_resource().clone()];
            verdict
        }
        IntentLabel::Safe => {
            let mut verdict = SafetyVerdict::safe();
            verdict.confidence = confidence;
            verdict
        }
    }
}

/// Fail-closed verdict: does not block the user, but is never silent about
/// the outage.
fn degraded_verdict(registry: &ResourceRegistry) -> SafetyVerdict {
    let mut verdict = SafetyVerdict::safe();
    verdict.severity = SeverityLevel::Medium;
    verdict.confidence = 0.0;
    verdict.requires_human_review = true;
    verdict.matched_signals = vec!["classifier:unavailable".to_string()];
    verdict.recommended_resources = vec![registry.default_crisis_resource().clone()];
    verdict
}

// ---------------------------------------------------------------------------
// Hosted provider (OpenAI-style chat completions contract)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct HostedProviderConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout: Duration,
}

pub struct HostedIntentProvider {
    client: reqwest::Client,
    config: HostedProviderConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl HostedIntentProvider {
    pub fn new(config: HostedProviderConfig) -> Result<Self, IntentError> {
        if config.endpoint.is_empty() {
            return Err(IntentError::NotConfigured);
        }
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| IntentError::Transport(e.to_string()))?;
        Ok(HostedIntentProvider { client, config })
    }
}

#[async_trait]
impl IntentProvider for HostedIntentProvider {
    async fn classify_intent(&self, text: &str) -> Result<IntentClassification, IntentError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: CLASSIFIER_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: 0.0,
            max_tokens: 16,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| IntentError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IntentError::Transport(format!(
                "classifier returned status {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| IntentError::Transport(e.to_string()))?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| IntentError::Unparseable("empty choices".to_string()))?;

        parse_label_line(&content)
    }

    fn name(&self) -> &'static str {
        "hosted-intent"
    }
}

/// Stand-in provider for deployments without a classifier endpoint. Every
/// call fails, so every low-confidence check degrades to the cautious
/// verdict instead of silently passing.
pub struct DisabledIntentProvider;

#[async_trait]
impl IntentProvider for DisabledIntentProvider {
    async fn classify_intent(&self, _text: &str) -> Result<IntentClassification, IntentError> {
        Err(IntentError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Parse the constrained "LABEL confidence" reply. Anything outside the
/// contract is unparseable and therefore a degraded outcome upstream.
fn parse_label_line(content: &str) -> Result<IntentClassification, IntentError> {
    let trimmed = content.trim();
    let mut parts = trimmed.split_whitespace();
    let label = match parts.next() {
        Some("SAFE") => IntentLabel::Safe,
        Some("SELF_HARM") => IntentLabel::SelfHarm,
        Some("MEDICAL_ADVICE") => IntentLabel::MedicalAdvice,
        Some("CRISIS") => IntentLabel::Crisis,
        _ => return Err(IntentError::Unparseable(trimmed.to_string())),
    };
    let confidence = match parts.next() {
        None => 0.5,
        Some(token) => token
            .parse::<f64>()
            .map_err(|_| IntentError::Unparseable(trimmed.to_string()))?,
    };
    if parts.next().is_some() {
        return Err(IntentError::Unparseable(trimmed.to_string()));
    }
    Ok(IntentClassification {
        label,
        confidence: confidence.clamp(0.0, 1.0),
    })
}
