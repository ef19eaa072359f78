//! API error responses
//!
//! Only two fault classes ever reach callers: client input errors (400) and
//! opaque server faults (500). Completion-response irregularities are
//! normalized away before this type is involved.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error envelope returned to HTTP callers as `{error, details?}`
#[derive(Debug)]
pub enum ApiError {
    /// Required input missing (client fault)
    BadRequest(&'static str),

    /// The completion service call failed (server fault)
    Upstream {
        message: &'static str,
        details: String,
    },

    /// Report rendering failed (server fault)
    Render {
        message: &'static str,
        details: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, json!({ "error": error })),
            ApiError::Upstream { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "details": details }),
            ),
            ApiError::Render { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let response = ApiError::BadRequest("Code and language are required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status() {
        let response = ApiError::Upstream {
            message: "Failed to review code",
            details: "timeout".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
