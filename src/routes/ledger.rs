// src/routes/ledger.rs - Audit ledger routes
use axum::{routing::get, Router};

use crate::handlers::ledger::{get_chain, latest_hash, verify_chain};
use crate::state::AppState;

/// Create ledger routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_chain))
        .route("/verify", get(verify_chain))
        .route("/latest", get(latest_hash))
}
