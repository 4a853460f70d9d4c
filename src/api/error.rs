//! Translation of service errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::{ModeError, ViewError};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Result type for fallible handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Mode change rejected or failed.
    Mode(ModeError),
    /// Page could not be rendered.
    View(ViewError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Mode(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Mode(_) | ApiError::View(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ModeError> for ApiError {
    fn from(e: ModeError) -> Self {
        ApiError::Mode(e)
    }
}

impl From<ViewError> for ApiError {
    fn from(e: ViewError) -> Self {
        ApiError::View(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Mode(e) => e.to_string(),
            ApiError::View(e) => e.to_string(),
        };

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
