use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kennel_core::error::CoreError;
use serde_json::json;

/// Body of every 500 response. Internal detail is logged, never returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when an `{id}` path segment is not an integer.
pub const INVALID_ID_MESSAGE: &str = "id should be a number";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so handlers can simply propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `kennel_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from the store.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body was not a JSON object.
    #[error("Bad request body: {0}")]
    BadBody(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Core(CoreError::InvalidId(raw)) => {
                tracing::debug!(raw_id = %raw, "Rejected non-numeric id");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": INVALID_ID_MESSAGE })),
                )
                    .into_response()
            }
            AppError::BadBody(reason) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": [reason] }))).into_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error_response()
            }
        }
    }
}

/// The generic 500 response shared by store failures and panic recovery.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
