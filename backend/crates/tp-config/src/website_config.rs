use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebsiteConfig {
    /// Public base URL the site and webhook are reachable at
    pub url: String,
}

impl WebsiteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.url.is_empty() {
            return Err(ConfigError::website("website.url is required"));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::website(format!(
                "website.url must be an http(s) URL, got '{}'",
                self.url
            )));
        }

        Ok(())
    }

    /// URL without a trailing slash, ready for path concatenation
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn is_https(&self) -> bool {
        self.url.starts_with("https://")
    }
}
