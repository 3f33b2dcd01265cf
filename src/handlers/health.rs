// src/handlers/health.rs - Health and metrics endpoints
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Basic health check endpoint
///
/// Returns service status and basic information
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let (chain_verified, chain_length, _) = state.risk.verify_chain();
    Json(json!({
        "status": "healthy",
        "service": "sentinel-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "risk_scoring": true,
            "coordinated_attack_detection": true,
            "escalation_tracking": true,
            "audit_ledger": true,
        },
        "ledger": {
            "length": chain_length,
            "verified": chain_verified,
        },
        "profiles_loaded": state.profiles.len(),
    }))
}

/// Prometheus metrics render
pub async fn metrics(State(state): State<AppState>) -> Result<String, StatusCode> {
    match &state.metrics {
        Some(handle) => Ok(handle.render()),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
