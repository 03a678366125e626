use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// One entry of a 400 validation response, keyed by the offending field.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation error")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    InvalidId(&'static str),
    #[error("{0}")]
    AuthRequired(&'static str),
    #[error("{0}")]
    AuthFailed(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::field("body", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation error",
                    "errors": errors,
                }),
            ),
            ApiError::InvalidId(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message, "error": "INVALID_ID" }),
            ),
            ApiError::AuthRequired(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": message, "error": "AUTH_REQUIRED" }),
            ),
            ApiError::AuthFailed(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": message, "error": "AUTH_FAILED" }),
            ),
            ApiError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                json!({ "success": false, "message": message, "error": "FORBIDDEN" }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": message, "error": "NOT_FOUND" }),
            ),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "An unexpected error occurred",
                        "error": "SERVER_ERROR",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
