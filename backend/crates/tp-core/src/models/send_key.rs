//! Send keys - the only credential the relay endpoint accepts.

use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Number of characters in a generated key (62^64 possible keys)
pub const SEND_KEY_LENGTH: usize = 64;

/// Number of characters kept by [`SendKey::redacted`]
const REDACTED_PREFIX_LENGTH: usize = 6;

/// Opaque secret that authorizes relaying messages to one chat.
///
/// `Debug` and `Display` never print the full key; use [`SendKey::as_str`]
/// where the raw value is required (storage, the owner's dashboard).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendKey(String);

impl SendKey {
    /// Generate a fresh key from the thread-local CSPRNG.
    ///
    /// Characters are drawn uniformly from `[A-Za-z0-9]`.
    pub fn generate() -> Self {
        let key = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SEND_KEY_LENGTH)
            .map(char::from)
            .collect();

        Self(key)
    }

    /// Wrap a key loaded from storage or received from a caller
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Short prefix safe to put in log lines
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(REDACTED_PREFIX_LENGTH).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for SendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SendKey").field(&self.redacted()).finish()
    }
}

impl fmt::Display for SendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
