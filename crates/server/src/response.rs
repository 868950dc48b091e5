//! Canonical response shapes and the error-kind to status-code mapping.
//!
//! Handlers rely on this module to stay thin and uniform. Storage detail is
//! logged here, at the boundary, and never serialized to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use courtside_domain::{CourtsideError, FieldError, ValidationError};
use serde::Serialize;
use tracing::error;

/// The canonical error envelope returned by the API.
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// Convert a domain error into an HTTP status and payload. Extend here as
/// new error categories emerge.
pub fn map_error(err: &CourtsideError) -> (StatusCode, ErrorPayload) {
    match err {
        CourtsideError::InvalidInput(verr) => (
            StatusCode::BAD_REQUEST,
            ErrorPayload {
                error: "invalid_input",
                message: Some("one or more fields are invalid".to_owned()),
                field_errors: verr.errors.clone(),
            },
        ),
        CourtsideError::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorPayload { error: "not_found", message: None, field_errors: Vec::new() },
        ),
        CourtsideError::AlreadyExists => (
            StatusCode::CONFLICT,
            ErrorPayload { error: "already_exists", message: None, field_errors: Vec::new() },
        ),
        CourtsideError::Conflict => (
            StatusCode::CONFLICT,
            ErrorPayload { error: "conflict", message: None, field_errors: Vec::new() },
        ),
        CourtsideError::Database(_) | CourtsideError::Config(_) | CourtsideError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorPayload { error: "internal_error", message: None, field_errors: Vec::new() },
        ),
    }
}

/// Error wrapper so handlers can use `?` on service calls.
pub struct ApiError(pub CourtsideError);

impl From<CourtsideError> for ApiError {
    fn from(err: CourtsideError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = map_error(&self.0);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Full detail stays in the logs, the client gets an opaque kind.
            error!(error = %self.0, "request failed");
        }
        (status, Json(payload)).into_response()
    }
}

/// Build an invalid-input error for a single field.
pub(crate) fn field_error(field: &str, message: &str) -> ApiError {
    let mut verr = ValidationError::new();
    verr.push(field, message);
    ApiError(CourtsideError::InvalidInput(verr))
}
