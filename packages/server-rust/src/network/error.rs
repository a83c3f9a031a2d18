//! Translation of domain errors into HTTP responses.
//!
//! [`ApiError`] is the single point where a [`MetadataError`] becomes a
//! status code and body. Handlers return `Result<_, ApiError>` and never
//! build error responses themselves.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dms_metadata_core::{ErrorKind, MetadataError};
use serde::Serialize;

/// Body sent for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper that renders a [`MetadataError`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub MetadataError);

impl From<MetadataError> for ApiError {
    fn from(err: MetadataError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Maps an error kind to its response status.
    #[must_use]
    pub fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ResolutionFailure | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message. Server-side failures get a generic text.
    fn public_message(&self) -> String {
        match &self.0 {
            MetadataError::InvalidInput(msg) | MetadataError::NotFound(msg) => msg.clone(),
            MetadataError::Resolution(_) | MetadataError::Internal(_) => {
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = Self::status_for(self.0.kind());
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
