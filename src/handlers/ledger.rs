// src/handlers/ledger.rs - Audit ledger inspection handlers
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::models::risk::{ChainResponse, ChainVerifyResponse};
use crate::state::AppState;

/// Full audit chain snapshot
#[utoipa::path(
    get,
    path = "/api/v1/ledger",
    responses(
        (status = 200, description = "Chain snapshot, genesis first", body = ChainResponse),
    ),
    tag = "Ledger"
)]
pub async fn get_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    let entries = state.risk.chain();
    Json(ChainResponse {
        length: entries.len(),
        entries,
    })
}

/// Walk the chain and verify both hash invariants
#[utoipa::path(
    get,
    path = "/api/v1/ledger/verify",
    responses(
        (status = 200, description = "Integrity walk result", body = ChainVerifyResponse),
    ),
    tag = "Ledger"
)]
pub async fn verify_chain(State(state): State<AppState>) -> Json<ChainVerifyResponse> {
    let (verified, length, latest_hash) = state.risk.verify_chain();
    Json(ChainVerifyResponse {
        verified,
        length,
        latest_hash,
    })
}

/// Hash of the current chain tip
#[utoipa::path(
    get,
    path = "/api/v1/ledger/latest",
    responses(
        (status = 200, description = "Tip hash"),
    ),
    tag = "Ledger"
)]
pub async fn latest_hash(State(state): State<AppState>) -> Json<Value> {
    let (_, length, latest_hash) = state.risk.verify_chain();
    Json(json!({ "length": length, "latest_hash": latest_hash }))
}
