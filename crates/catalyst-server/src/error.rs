//! HTTP error envelope: `{"success": false, "error": "..."}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

#[derive(Debug)]
pub enum ApiError {
    /// Client input problem; the message is shown to the caller.
    BadRequest(String),
    MethodNotAllowed,
    /// Server-side failure; only the fixed message leaves the process.
    Internal(&'static str),
}

impl ApiError {
    /// Log `err` and hide it behind `message`.
    pub fn internal(message: &'static str, err: impl std::fmt::Display) -> Self {
        error!("{}: {}", message, err);
        Self::Internal(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!("Rejected query string: {}", rejection.body_text());
        Self::BadRequest("Invalid query parameters".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };

        (
            status,
            Json(serde_json::json!({
                "success": false,
                "error": message,
            })),
        )
            .into_response()
    }
}

/// Fallback for routes hit with the wrong HTTP method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
