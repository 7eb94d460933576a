use crate::{AuthError, Result as AuthErrorResult, SessionClaims};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// 30 days
pub const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Issues and validates HS256 session tokens bound to a Telegram user id
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    max_age_secs: u64,
}

impl SessionCodec {
    pub fn with_hs256(secret: &[u8], max_age_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 second clock skew tolerance

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            max_age_secs,
        }
    }

    /// Lifetime of issued sessions, also used as the cookie Max-Age
    pub fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    #[track_caller]
    pub fn issue(&self, user_id: i64) -> AuthErrorResult<String> {
        let now = Utc::now().timestamp();
        let max_age = i64::try_from(self.max_age_secs).unwrap_or(i64::MAX);
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(max_age),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::SessionEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Validate a session token and return the user id it is bound to
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<i64> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::SessionExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::InvalidSession {
                        message: e.to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.user_id()
    }
}
