// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod server;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{
    HealthResponse, PathwayRequestAction, PathwayUpdateRequest, PathwayUpdateResponse,
    SafetyAction, SafetyCheckRequest, SafetyCheckResponse, ScreenReplyRequest,
    ScreenReplyResponse, SessionPathwayResponse, ToolOutcomeRequest, ToolOutcomeResponse,
    MAX_TEXT_LENGTH,
};
pub use http_server::{build_router, start_server};
pub use server::ApiServer;
