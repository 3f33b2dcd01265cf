// src/handlers/profiles.rs - Profile store handlers
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::middleware::error_handler::ApiError;
use crate::models::profile::{ProfileImportSummary, ProfileResponse, UpsertProfileRequest};
use crate::state::AppState;

/// Upsert a single user profile
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    request_body = UpsertProfileRequest,
    responses(
        (status = 201, description = "Profile stored"),
        (status = 400, description = "Invalid profile"),
    ),
    tag = "Profiles"
)]
#[instrument(skip(state, request), fields(user_id = %request.user_id))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if request.user_id.trim().is_empty() {
        return Err(ApiError::bad_request("user_id", "must not be empty"));
    }
    if let (Some(start), Some(end)) = (request.usual_login_start, request.usual_login_end) {
        if start > 23 || end > 23 {
            return Err(ApiError::bad_request(
                "usual_login_times",
                "hours must be in 0-23",
            ));
        }
    }

    let profile = request.into_profile();
    let user_id = profile.user_id.clone();
    state.profiles.upsert(profile);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user_id": user_id, "stored": true })),
    ))
}

/// Batch-import profiles from a CSV body
#[utoipa::path(
    post,
    path = "/api/v1/profiles/import",
    request_body = String,
    responses(
        (status = 200, description = "Import summary", body = ProfileImportSummary),
        (status = 400, description = "Batch rejected (missing required column)"),
    ),
    tag = "Profiles"
)]
pub async fn import_profiles(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ProfileImportSummary>, ApiError> {
    let summary = state.profiles.import_csv(&body)?;
    Ok(Json(summary))
}

/// Fetch one stored profile
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{user_id}",
    params(("user_id" = String, Path, description = "User to fetch")),
    responses(
        (status = 200, description = "Stored profile", body = ProfileResponse),
        (status = 404, description = "Profile not loaded"),
    ),
    tag = "Profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .profiles
        .get(&user_id)
        .ok_or_else(|| ApiError::not_found(format!("profile {user_id}")))?;
    Ok(Json(ProfileResponse { profile }))
}
