use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use tp_auth::AuthError;
use tp_db::DbError;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Authentication failed: {source} {location}")]
    AuthInvalid {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage error: {source} {location}")]
    Storage {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Session could not be issued: {source} {location}")]
    Session {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Delivery queue is closed {location}")]
    QueueClosed { location: ErrorLocation },
}

impl RelayError {
    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for RelayError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
