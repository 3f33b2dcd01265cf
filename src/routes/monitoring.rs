// src/routes/monitoring.rs - Monitoring routes
use axum::{routing::get, Router};

use crate::handlers::monitoring::latency_stats;
use crate::state::AppState;

/// Create monitoring routes
pub fn create_routes() -> Router<AppState> {
    Router::new().route("/latency", get(latency_stats))
}
