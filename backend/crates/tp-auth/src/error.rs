use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing login field '{field}' {location}")]
    MissingField {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("Malformed login field '{field}': {message} {location}")]
    MalformedField {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Login data expired: auth_date {auth_date} is {age_secs}s old {location}")]
    Expired {
        auth_date: i64,
        age_secs: i64,
        location: ErrorLocation,
    },

    #[error("Signing key rejected: {message} {location}")]
    SigningKey {
        message: String,
        location: ErrorLocation,
    },

    #[error("Login data hash does not match {location}")]
    SignatureMismatch { location: ErrorLocation },

    #[error("Invalid session: {message} {location}")]
    InvalidSession {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session expired {location}")]
    SessionExpired { location: ErrorLocation },

    #[error("Session encode failed: {source} {location}")]
    SessionEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Short machine-readable reason, safe to log next to user input
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::MalformedField { .. } => "malformed_field",
            Self::Expired { .. } => "expired",
            Self::SigningKey { .. } => "signing_key",
            Self::SignatureMismatch { .. } => "signature_mismatch",
            Self::InvalidSession { .. } => "invalid_session",
            Self::SessionExpired { .. } => "session_expired",
            Self::SessionEncode { .. } => "session_encode",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
