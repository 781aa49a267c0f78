//! Transport error type with Sentry integration.
//!
//! Every handler returns `Result<_, AppError>`. Failures before the service
//! runs answer 400; a service that produced no response answers 500. The body
//! is always `{"status": "..."}`.

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shopapi_core::{Status, ValidationError};
use thiserror::Error;

use crate::upload::UploadError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request could not be decoded.
    #[error("failed extracting request: {0}")]
    BadRequest(String),

    /// The request decoded but a field is missing or out of range.
    #[error("failed validating request: {0}")]
    Validation(#[from] ValidationError),

    /// The service logged a storage failure and returned nothing.
    #[error("{}", Status::ServiceError)]
    ServiceFailed,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: String,
}

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ServiceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        let body = StatusBody {
            status: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// HTTP status for a domain outcome.
///
/// No status and `Success` are 200, `resource not found` is 404, a service
/// error is 500, and every other outcome is the caller's fault.
#[must_use]
pub const fn status_code(status: Option<Status>) -> StatusCode {
    match status {
        None | Some(Status::Success) => StatusCode::OK,
        Some(Status::NotFound) => StatusCode::NOT_FOUND,
        Some(Status::ServiceError) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(_) => StatusCode::BAD_REQUEST,
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
