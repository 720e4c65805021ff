use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::AppState;

/// Health data for the liveness endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub upstream: UpstreamStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UpstreamStatus {
    pub model: String,
    pub credential_configured: bool,
}

/// `GET /health`
///
/// Reports service liveness and upstream configuration. Never calls the
/// completion API.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: UpstreamStatus {
            model: state.config.chat.model.clone(),
            credential_configured: state.config.chat.api_key.is_some(),
        },
    })
}
