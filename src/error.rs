// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Guard failures carry the exact message strings the frontend matches on, so
/// the wording (including capitalization) is part of the contract.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    // 401 Unauthorized - missing/invalid/expired token
    Unauthenticated,
    // 403 Forbidden - authenticated but lacking role, or identity mismatch
    Forbidden(String),
    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthenticated => "forbidden Access",
            ApiError::Forbidden(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { collection } => {
                ApiError::bad_request(format!("document already exists in {collection}"))
            }
            StoreError::Backend(msg) => {
                // Log the real error but return a generic message
                tracing::error!("store operation failed: {msg}");
                ApiError::internal("an error occurred while processing your request")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(json!({ "message": self.message() }))).into_response()
    }
}
