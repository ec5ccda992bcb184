//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps lifecycle service failures to HTTP status codes with a
//! `{"msg": "..."}` body. Storage failure details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::service::ServiceError;

/// Client-facing message for rejected create requests.
pub const INVALID_ARGUMENTS_MSG: &str = "Invalid arguments. 'name' and 'course' are required, \
     'date' and 'expires' should be in a valid YYYY-MM-DD format if present";

/// Client-facing message for unknown ids.
pub const INVALID_ID_MSG: &str = "Invalid id";

/// Client-facing message for certificates purged on read.
pub const EXPIRED_MSG: &str = "Certificate expired";

/// Client-facing message for storage failures.
pub const INTERNAL_MSG: &str = "An internal error occurred";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    pub msg: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Create parameters missing or malformed (400).
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// No certificate with this id (404).
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Certificate had expired and was purged (404).
    #[error("certificate expired: {0}")]
    Expired(String),

    /// Storage or other server-side failure (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidArguments(_) => (StatusCode::BAD_REQUEST, INVALID_ARGUMENTS_MSG),
            Self::InvalidId(_) => (StatusCode::NOT_FOUND, INVALID_ID_MSG),
            Self::Expired(_) => (StatusCode::NOT_FOUND, EXPIRED_MSG),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MSG),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            msg: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(e) => Self::InvalidArguments(e.to_string()),
            ServiceError::NotFound(id) => Self::InvalidId(id.into_string()),
            ServiceError::Expired(id) => Self::Expired(id.into_string()),
            ServiceError::Storage(e) => Self::Internal(e.to_string()),
        }
    }
}
