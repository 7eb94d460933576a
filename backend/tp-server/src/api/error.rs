//! REST API error types
//!
//! Every error becomes a JSON body `{"error": {"code", "message"}}` with a
//! matching status. Internal details are logged, never sent to the client.

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;
use tp_relay::RelayError;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "BAD_REQUEST")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Login assertion rejected (400)
    #[error("Auth failed: {message} {location}")]
    AuthFailed {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Unknown send key (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::AuthFailed { message, location } => {
                log::warn!("Auth failed: {} {}", message, location);
                (StatusCode::BAD_REQUEST, "AUTH_FAILED", "Auth failed".to_string())
            }
            ApiError::BadRequest { message, .. } => {
                log::warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
            }
            ApiError::Unauthorized { message, .. } => {
                log::warn!("Unauthorized: {}", message);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
            }
            ApiError::Internal { message, location } => {
                log::error!("Internal error: {} {}", message, location);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.into(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert relay errors to API errors
impl From<RelayError> for ApiError {
    #[track_caller]
    fn from(e: RelayError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            RelayError::AuthInvalid { source, .. } => ApiError::AuthFailed {
                message: source.reason().to_string(),
                location,
            },
            RelayError::BadRequest { message, .. } => ApiError::BadRequest { message, location },
            RelayError::Unauthorized { message, .. } => {
                ApiError::Unauthorized { message, location }
            }
            // Don't expose storage or session internals to clients
            other @ (RelayError::Storage { .. }
            | RelayError::Session { .. }
            | RelayError::QueueClosed { .. }) => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
