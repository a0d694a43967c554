// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use super::errors::ApiError;
use super::handlers::{
    PathwayUpdateRequest, SafetyCheckRequest, ScreenReplyRequest, ToolOutcomeRequest,
};
use super::server::ApiServer;

#[derive(Clone)]
pub struct AppState {
    pub api_server: Arc<ApiServer>,
}

pub fn build_router(api_server: Arc<ApiServer>) -> Router {
    let state = AppState { api_server };

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/safety/check", post(safety_check_handler))
        .route("/v1/content/screen", post(screen_reply_handler))
        .route("/v1/pathway", post(pathway_update_handler))
        .route("/v1/pathway/:name", get(pathway_profile_handler))
        .route("/v1/pathway/session/:subject_id", get(session_pathway_handler))
        .route(
            "/v1/pathway/session/:subject_id/outcome",
            post(tool_outcome_handler),
        )
        .route("/v1/audit/export", get(audit_export_handler))
        .route("/v1/resources", get(resources_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(
    api_server: ApiServer,
    listen_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(Arc::new(api_server));

    let addr = listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("safety node API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.api_server.health_check())
}

async fn safety_check_handler(
    State(state): State<AppState>,
    Json(request): Json<SafetyCheckRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state
        .api_server
        .safety_check(request)
        .await
        .map(Json)
        .map_err(ApiErrorResponse)
}

async fn screen_reply_handler(
    State(state): State<AppState>,
    Json(request): Json<ScreenReplyRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state
        .api_server
        .screen_reply(request)
        .await
        .map(Json)
        .map_err(ApiErrorResponse)
}

async fn pathway_update_handler(
    State(state): State<AppState>,
    Json(request): Json<PathwayUpdateRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state
        .api_server
        .update_pathway(request)
        .await
        .map(Json)
        .map_err(ApiErrorResponse)
}

async fn pathway_profile_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state
        .api_server
        .pathway_profile_by_name(&name)
        .map(Json)
        .map_err(ApiErrorResponse)
}

async fn session_pathway_handler(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> impl IntoResponse {
    Json(state.api_server.session_pathway(&subject_id).await)
}

async fn tool_outcome_handler(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    Json(request): Json<ToolOutcomeRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state
        .api_server
        .record_tool_outcome(&subject_id, request)
        .await
        .map(Json)
        .map_err(ApiErrorResponse)
}

async fn audit_export_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state
        .api_server
        .audit_export()
        .await
        .map(Json)
        .map_err(ApiErrorResponse)
}

async fn resources_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.api_server.registry().all().to_vec())
}

// Error response wrapper
pub struct ApiErrorResponse(pub ApiError);

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error_response = self.0.to_response(None);

        (status, Json(error_response)).into_response()
    }
}
