// ABOUTME: API error type mapping engine and validation failures to HTTP responses.
// ABOUTME: Every variant produces a JSON body of the form {"error": "..."}.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jotter_core::ValidationError;
use jotter_store::EngineError;
use serde_json::json;

/// Handler-level error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// No record with the requested id (404).
    NotFound,
    /// Payload failed field-bound checks (422).
    Validation(ValidationError),
    /// Store failure; the cause is logged, not echoed to the client (500).
    Internal,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(_) => ApiError::NotFound,
            EngineError::Store(e) => {
                tracing::error!("store failure: {e}");
                ApiError::Internal
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
