use crate::{ConfigError, ConfigErrorResult, DEFAULT_TELEGRAM_API_URL};

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// `<bot id>:<secret>` as issued by BotFather
    pub bot_token: String,
    /// Bot username shown by the login widget (without '@')
    pub bot_username: String,
    /// Bot API base URL
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            bot_username: String::new(),
            api_url: String::from(DEFAULT_TELEGRAM_API_URL),
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("bot_username", &self.bot_username)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl TelegramConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.bot_token.is_empty() {
            return Err(ConfigError::telegram("telegram.bot_token is required"));
        }

        match self.bot_token.rsplit_once(':') {
            Some((bot_id, secret)) if !bot_id.is_empty() && !secret.is_empty() => {}
            _ => {
                return Err(ConfigError::telegram(
                    "telegram.bot_token must look like '<bot id>:<secret>'",
                ));
            }
        }

        if self.bot_username.trim().is_empty() {
            return Err(ConfigError::telegram("telegram.bot_username is required"));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::telegram(format!(
                "telegram.api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }

        Ok(())
    }

    /// Webhook route: '/' followed by the part of the token after its last ':'
    pub fn webhook_path(&self) -> String {
        let suffix = self
            .bot_token
            .rsplit_once(':')
            .map(|(_, secret)| secret)
            .unwrap_or(&self.bot_token);

        format!("/{}", suffix)
    }

    /// Username without a leading '@'
    pub fn bot_username(&self) -> &str {
        self.bot_username.trim_start_matches('@')
    }
}
