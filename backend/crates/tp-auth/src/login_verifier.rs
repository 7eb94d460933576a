//! Telegram login widget verification.
//!
//! The widget redirects to `/login` with the user's profile fields, an
//! `auth_date` and a `hash`. The hash is the hex HMAC-SHA256 of the
//! "data-check-string" (every other field as `key=value`, sorted, joined by
//! newlines), keyed with SHA-256 of the bot token.
//!
//! Ref: <https://core.telegram.org/widgets/login#checking-authorization>

use crate::{AuthError, Identity, Result as AuthErrorResult};

use std::collections::BTreeMap;
use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Assertions older than this are rejected even with a valid hash
pub const MAX_AUTH_AGE_SECS: i64 = 86_400;

const HASH_FIELD: &str = "hash";
const AUTH_DATE_FIELD: &str = "auth_date";
const ID_FIELD: &str = "id";
const FIRST_NAME_FIELD: &str = "first_name";

/// Derive the HMAC key for login verification from the bot token
pub fn auth_secret(bot_token: &str) -> [u8; 32] {
    Sha256::digest(bot_token.as_bytes()).into()
}

/// Verifies signed identity assertions from the login widget.
///
/// Pure: no I/O, no state besides the derived secret.
#[derive(Clone)]
pub struct AuthVerifier {
    secret: [u8; 32],
    max_age_secs: i64,
}

impl AuthVerifier {
    pub fn from_bot_token(bot_token: &str) -> Self {
        Self::with_secret(auth_secret(bot_token))
    }

    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            secret,
            max_age_secs: MAX_AUTH_AGE_SECS,
        }
    }

    /// `true` iff the assertion is fresh and carries a valid hash
    pub fn verify(&self, assertion: &BTreeMap<String, String>) -> bool {
        self.check(assertion).is_ok()
    }

    /// Same as [`verify`](Self::verify), reporting why an assertion was rejected
    #[track_caller]
    pub fn check(&self, assertion: &BTreeMap<String, String>) -> AuthErrorResult<()> {
        self.check_at(assertion, Utc::now().timestamp())
    }

    /// Check against an explicit clock (unix seconds)
    #[track_caller]
    pub fn check_at(&self, assertion: &BTreeMap<String, String>, now: i64) -> AuthErrorResult<()> {
        let auth_date = assertion
            .get(AUTH_DATE_FIELD)
            .ok_or_else(|| AuthError::MissingField {
                field: AUTH_DATE_FIELD,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let auth_date: i64 = auth_date.parse().map_err(|_| AuthError::MalformedField {
            field: AUTH_DATE_FIELD,
            message: format!("'{}' is not a unix timestamp", auth_date),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let age_secs = now.checked_sub(auth_date).ok_or_else(|| AuthError::MalformedField {
            field: AUTH_DATE_FIELD,
            message: format!("'{}' is out of range", auth_date),
            location: ErrorLocation::from(Location::caller()),
        })?;
        if age_secs > self.max_age_secs {
            return Err(AuthError::Expired {
                auth_date,
                age_secs,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // A missing hash compares against the empty string and fails below
        let provided = assertion.get(HASH_FIELD).map(String::as_str).unwrap_or("");
        let expected = self.sign(assertion)?;

        if !bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
            return Err(AuthError::SignatureMismatch {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Verify the assertion, then extract the identity it asserts
    #[track_caller]
    pub fn authenticate(&self, assertion: &BTreeMap<String, String>) -> AuthErrorResult<Identity> {
        self.check(assertion)?;

        let id = assertion.get(ID_FIELD).ok_or_else(|| AuthError::MissingField {
            field: ID_FIELD,
            location: ErrorLocation::from(Location::caller()),
        })?;
        let id: i64 = id.parse().map_err(|_| AuthError::MalformedField {
            field: ID_FIELD,
            message: format!("'{}' is not a numeric user id", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let first_name = assertion
            .get(FIRST_NAME_FIELD)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AuthError::MissingField {
                field: FIRST_NAME_FIELD,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Identity {
            id,
            first_name: first_name.clone(),
        })
    }

    /// Lowercase hex HMAC of the data-check-string
    #[track_caller]
    pub fn sign(&self, assertion: &BTreeMap<String, String>) -> AuthErrorResult<String> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret).map_err(|e| {
            AuthError::SigningKey {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;
        mac.update(data_check_string(assertion).as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Every field except `hash` as `key=value`, sorted, newline-joined
pub fn data_check_string(assertion: &BTreeMap<String, String>) -> String {
    let mut pairs: Vec<String> = assertion
        .iter()
        .filter(|(key, _)| key.as_str() != HASH_FIELD)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    pairs.sort();

    pairs.join("\n")
}
