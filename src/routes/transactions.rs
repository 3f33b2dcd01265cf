// src/routes/transactions.rs - Transaction evaluation routes
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::transactions::{evaluate_transaction, get_user_history};
use crate::state::AppState;

/// Create transaction routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(evaluate_transaction))
        .route("/history/{user_id}", get(get_user_history))
}
