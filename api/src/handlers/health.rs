use axum::{response::IntoResponse, Json};
use chrono::Utc;
use tracing::debug;

use crate::{middleware_hooks::API_VERSION, models::HealthResponse};

/// Health check endpoint
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        version: API_VERSION.to_string(),
    })
}
