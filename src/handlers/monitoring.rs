// src/handlers/monitoring.rs - Latency monitoring handlers
use axum::{extract::State, response::Json};

use crate::models::risk::LatencyStatsResponse;
use crate::state::AppState;

/// Rolling processing-latency statistics
#[utoipa::path(
    get,
    path = "/api/v1/monitoring/latency",
    responses(
        (status = 200, description = "Latency window snapshot", body = LatencyStatsResponse),
    ),
    tag = "Monitoring"
)]
pub async fn latency_stats(State(state): State<AppState>) -> Json<LatencyStatsResponse> {
    Json(state.risk.latency_stats().into())
}
