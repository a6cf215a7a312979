//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! handler fails the same way.
//!
//! | error | status |
//! |---|---|
//! | `NotFound` | 404 |
//! | `Validation` | 400 |
//! | `Conflict` | 409 |
//! | `Database`, `Internal` | 500 |

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotwise_core::errors::SchedulingError;
use slotwise_notify::NotifyError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `SchedulingError` and implements `IntoResponse`, so
/// handlers can return `Result<Json<T>, AppError>` and use `?` on domain,
/// repository and gateway results alike.
#[derive(Debug)]
pub struct AppError(pub SchedulingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SchedulingError::NotFound(_) => StatusCode::NOT_FOUND,
            SchedulingError::Validation(_) => StatusCode::BAD_REQUEST,
            SchedulingError::Conflict(_) => StatusCode::CONFLICT,
            SchedulingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchedulingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError(err)
    }
}

/// Repository errors surface as `SchedulingError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SchedulingError::Database(err))
    }
}

/// Gateway failures surface as `SchedulingError::Internal`.
impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        AppError(SchedulingError::Internal(Box::new(err)))
    }
}

/// Unreadable request bodies are client errors with the usual JSON error body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(SchedulingError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(SchedulingError::Validation(rejection.body_text()))
    }
}

/// Maps a SchedulingError to an HTTP response
pub fn map_error(err: SchedulingError) -> Response {
    AppError(err).into_response()
}
