// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use solace_safety_node::{
    api::{start_server, ApiServer},
    config::Settings,
    hazard::{HazardLogger, JsonlHazardSink},
    monitoring::OpsAlertChannel,
    pathway::PathwayManager,
    redaction::{RedactionConfig, Redactor},
    resources::ResourceRegistry,
    safety::{
        DisabledIntentProvider, HostedIntentProvider, HostedProviderConfig, IntentGate,
        IntentProvider, SafetyOrchestrator,
    },
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("{}", solace_safety_node::version::get_version_string());

    let settings = Settings::from_env();

    // Static, versioned resource register; jurisdiction-specific data, not code.
    let registry = Arc::new(match &settings.resource_registry_path {
        Some(path) => ResourceRegistry::from_file(path)?,
        None => ResourceRegistry::new(),
    });
    tracing::info!(
        region = registry.region(),
        version = registry.version(),
        contacts = registry.all().len(),
        "resource registry loaded"
    );

    let alerts = OpsAlertChannel::default();

    if let Some(parent) = settings.hazard_log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let sink = Arc::new(JsonlHazardSink::new(settings.hazard_log_path.clone()));
    let logger = Arc::new(HazardLogger::new(sink, alerts.clone()));

    let provider: Arc<dyn IntentProvider> = if settings.classifier_endpoint.is_empty() {
        tracing::warn!(
            "CLASSIFIER_ENDPOINT not set; intent gate disabled, low-confidence checks will degrade"
        );
        Arc::new(DisabledIntentProvider)
    } else {
        Arc::new(HostedIntentProvider::new(HostedProviderConfig {
            endpoint: settings.classifier_endpoint.clone(),
            api_key: settings.classifier_api_key.clone(),
            model: settings.classifier_model.clone(),
            request_timeout: settings.classifier_timeout,
        })?)
    };
    let intent_gate = IntentGate::new(provider, settings.classifier_timeout);

    let redactor = Redactor::new(RedactionConfig {
        redact_dates: settings.redact_dates,
        redact_names: settings.redact_names,
    });

    let orchestrator = SafetyOrchestrator::new(
        redactor,
        intent_gate,
        registry.clone(),
        logger.clone(),
        alerts.clone(),
    )
    .with_certainty_threshold(settings.keyword_certainty_threshold);

    let pathways = PathwayManager::new(chrono::Duration::seconds(settings.pathway_cooldown_secs));

    let api_server = ApiServer::new(orchestrator, pathways, logger, registry);

    start_server(api_server, &settings.listen_addr)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
