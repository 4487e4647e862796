//! HTTP error mapping

use crate::types::FraudError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

/// Engine error surfaced at the HTTP boundary
#[derive(Debug)]
pub struct ApiError(pub FraudError);

impl From<FraudError> for ApiError {
    fn from(err: FraudError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FraudError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            FraudError::TransactionNotFound { .. } => StatusCode::NOT_FOUND,
            other => {
                tracing::error!("Internal error: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
