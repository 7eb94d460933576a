use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_SESSION_MAX_AGE_SECS, MAX_SESSION_MAX_AGE_SECS,
    MIN_SECRET_KEY_LENGTH,
};

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HS256 secret for session cookies
    pub secret_key: String,
    pub max_age_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
        }
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret_key", &"<redacted>")
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::session("session.secret_key is required"));
        }

        if self.secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(ConfigError::session(format!(
                "session.secret_key must be at least {} characters",
                MIN_SECRET_KEY_LENGTH
            )));
        }

        if self.max_age_secs == 0 {
            return Err(ConfigError::session("session.max_age_secs must be > 0"));
        }

        if self.max_age_secs > MAX_SESSION_MAX_AGE_SECS {
            return Err(ConfigError::session(format!(
                "session.max_age_secs must be at most {}",
                MAX_SESSION_MAX_AGE_SECS
            )));
        }

        Ok(())
    }
}
