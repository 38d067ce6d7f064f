//! Health and metrics handlers.

use axum::{extract::Extension, http::StatusCode, response::Response, Json};
use serde::Serialize;
use std::sync::Arc;

use super::body_response;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let metrics = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    body_response(
        StatusCode::OK,
        "text/plain; version=0.0.4",
        None,
        metrics,
    )
}
