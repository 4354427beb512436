//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lexaid_core::relay::RelayError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human-readable message attached to every relay failure.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to process request";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Any failure of the relay, whatever its cause.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Relay(_) => (StatusCode::INTERNAL_SERVER_ERROR, RELAY_FAILURE_MESSAGE),
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}
