//! HTTP transport
//!
//! Routes:
//! - `POST /api/transactions` - submit a transaction
//! - `GET  /api/transactions` - list the ledger
//! - `POST /api/transactions/:id/claim` - mark a transaction as claimed
//! - `GET  /api/fraud-reports` - list fraud reports
//! - `GET  /health` - liveness and counters

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use crate::core::FraudEngine;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<FraudEngine>,
}

/// Create the router serving `engine`
pub fn router(engine: Arc<FraudEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/transactions",
            post(handlers::submit_transaction).get(handlers::list_transactions),
        )
        .route(
            "/api/transactions/:id/claim",
            post(handlers::claim_transaction),
        )
        .route("/api/fraud-reports", get(handlers::list_fraud_reports))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
