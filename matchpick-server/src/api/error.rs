//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors returned by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// Client error; body is plain text
    BadRequest(String),
    /// Unexpected failure; body is `{"error": message}`
    Internal(String),
}

impl From<matchpick_common::Error> for ApiError {
    fn from(e: matchpick_common::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": message,
                })),
            )
                .into_response(),
        }
    }
}
