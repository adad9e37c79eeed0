use axum::{Json, extract::State};
use serde::Serialize;
use tracing::debug;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    completion: String,
}

/// Liveness plus whether the completion client can make calls.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let completion = if state.voucher_service.completion_configured() {
        "configured"
    } else {
        "missing_api_key"
    };
    debug!(completion, "health check");

    Json(HealthResponse {
        status: "OK".to_string(),
        completion: completion.to_string(),
    })
}
