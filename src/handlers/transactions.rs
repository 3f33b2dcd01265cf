// src/handlers/transactions.rs - Transaction evaluation handlers
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::instrument;

use crate::middleware::error_handler::ApiError;
use crate::models::risk::EvaluateResponse;
use crate::models::transaction::{EvaluateTransactionRequest, HistoryResponse};
use crate::state::AppState;

/// Score one transaction and chain the decision into the audit ledger
#[utoipa::path(
    post,
    path = "/api/v1/transactions/evaluate",
    request_body = EvaluateTransactionRequest,
    responses(
        (status = 200, description = "Transaction scored and recorded", body = EvaluateResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Audit ledger failed integrity verification"),
    ),
    tag = "Transactions"
)]
#[instrument(skip(state, request), fields(user_id = %request.user_id))]
pub async fn evaluate_transaction(
    State(state): State<AppState>,
    Json(request): Json<EvaluateTransactionRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    if request.user_id.trim().is_empty() {
        return Err(ApiError::bad_request("user_id", "must not be empty"));
    }

    let profile = state.profiles.get_or_default(&request.user_id);
    let tx = request.into_transaction(&profile);

    let (result, ledger_entry) = state.risk.evaluate_and_record(&tx, &profile)?;

    Ok(Json(EvaluateResponse {
        result,
        ledger_entry,
    }))
}

/// Retained transaction history for one user
#[utoipa::path(
    get,
    path = "/api/v1/transactions/history/{user_id}",
    params(("user_id" = String, Path, description = "User to fetch history for")),
    responses(
        (status = 200, description = "Retained history, oldest first", body = HistoryResponse),
    ),
    tag = "Transactions"
)]
pub async fn get_user_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<HistoryResponse> {
    let transactions = state.risk.history(&user_id);
    Json(HistoryResponse {
        user_id,
        count: transactions.len(),
        transactions,
    })
}
