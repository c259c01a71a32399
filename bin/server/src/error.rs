//! Errors returned by API handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// A request the API could not answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A query parameter could not be parsed.
    BadRequest { param: &'static str, value: String, reason: &'static str },
    /// No workflow has the requested filename.
    NotFound { filename: String },
}

impl ApiError {
    pub(crate) fn bad_request(param: &'static str, value: &str, reason: &'static str) -> Self {
        Self::BadRequest {
            param,
            value: value.to_string(),
            reason,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest {
                param,
                value,
                reason,
            } => write!(f, "invalid {param} '{value}': {reason}"),
            Self::NotFound { filename } => write!(f, "workflow '{filename}' not found"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
