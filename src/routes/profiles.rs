// src/routes/profiles.rs - Profile store routes
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::profiles::{get_profile, import_profiles, upsert_profile};
use crate::state::AppState;

/// Create profile routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_profile))
        .route("/import", post(import_profiles))
        .route("/{user_id}", get(get_profile))
}
