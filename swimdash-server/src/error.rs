//! API error type with IntoResponse.
//!
//! Every failure becomes a JSON body `{error, message}` with a matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use swimdash_core::ScopeParseError;

#[derive(Debug)]
pub enum ApiError {
    /// Year selection was neither "all" nor a year (400)
    InvalidScope(ScopeParseError),

    /// Malformed query parameter (400)
    BadRequest { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::InvalidScope(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "invalid_scope",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScopeParseError> for ApiError {
    fn from(e: ScopeParseError) -> Self {
        Self::InvalidScope(e)
    }
}
