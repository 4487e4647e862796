//! Request handlers

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::types::{FraudError, FraudReport, RawSubmission, Transaction, TransactionId};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    status: &'static str,
    message: &'static str,
    fraud: bool,
    transaction_id: TransactionId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    transactions: usize,
    fraud_reports: usize,
}

/// Record a transaction and score it
pub async fn submit_transaction(
    State(state): State<AppState>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let Json(raw) =
        payload.map_err(|rejection| FraudError::invalid_input("body", &rejection.body_text()))?;

    let outcome = state.engine.submit(raw).map_err(|e| {
        tracing::info!(error = %e, "Transaction rejected");
        ApiError(e)
    })?;

    let message = if outcome.fraud_detected {
        "Transaction recorded; suspicious pattern detected"
    } else {
        "Transaction recorded"
    };

    Ok(Json(SubmitResponse {
        status: "success",
        message,
        fraud: outcome.fraud_detected,
        transaction_id: outcome.transaction_id,
    }))
}

/// List the full ledger
pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.engine.transactions())
}

/// List every fraud report
pub async fn list_fraud_reports(State(state): State<AppState>) -> Json<Vec<FraudReport>> {
    Json(state.engine.fraud_reports())
}

/// Mark a transaction as claimed
pub async fn claim_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.engine.mark_claimed(id)?;
    Ok(Json(transaction))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        transactions: state.engine.transaction_count(),
        fraud_reports: state.engine.report_count(),
    })
}
