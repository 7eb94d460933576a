use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    DatabaseConfig, LoggingConfig, ServerConfig, SessionConfig, TelegramConfig, WebsiteConfig,
};

use std::path::{Path, PathBuf};

use log::{LevelFilter, info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub telegram: TelegramConfig,
    pub website: WebsiteConfig,
    pub session: SessionConfig,
    /// Verbose logging and a startup warning
    pub debug: bool,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for TELEPUSH_CONFIG_DIR env var, else use ./.telepush/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TELEPUSH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TELEPUSH_CONFIG_DIR env var > ./.telepush/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.telegram.validate()?;
        self.website.validate()?;
        self.session.validate()?;

        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let path = Path::new(&self.database.path);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        Ok(Self::config_dir()?.join(path))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Route the bot's updates are posted to
    pub fn webhook_path(&self) -> String {
        self.telegram.webhook_path()
    }

    /// Public URL registered with the bot platform
    pub fn webhook_url(&self) -> String {
        format!("{}{}", self.website.base_url(), self.webhook_path())
    }

    /// Configured level, raised to Debug in debug mode
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.debug {
            (*self.logging.level).max(LevelFilter::Debug)
        } else {
            *self.logging.level
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        if self.debug {
            warn!("Running in DEBUG mode! Do not use in production.");
        }

        info!("Configuration loaded:");
        info!("  server: {}", self.bind_addr());
        info!("  database: {}", self.database.path);
        info!("  website: {}", self.website.base_url());
        info!(
            "  telegram: @{} via {}",
            self.telegram.bot_username(),
            self.telegram.api_url
        );
        info!("  session: max_age={}s", self.session.max_age_secs);
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.effective_log_level(),
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Unprefixed names from older deployments; TELEPUSH_* below wins
        self.apply_legacy_env();

        // Server
        Self::apply_env_string("TELEPUSH_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("TELEPUSH_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("TELEPUSH_DATABASE_FILE", &mut self.database.path);

        // Logging
        Self::apply_env_parse("TELEPUSH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TELEPUSH_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TELEPUSH_LOG_FILE", &mut self.logging.file);

        // Telegram
        Self::apply_env_string("TELEPUSH_BOT_TOKEN", &mut self.telegram.bot_token);
        Self::apply_env_string("TELEPUSH_BOT_USERNAME", &mut self.telegram.bot_username);
        Self::apply_env_string("TELEPUSH_TELEGRAM_API_URL", &mut self.telegram.api_url);

        // Website
        Self::apply_env_string("TELEPUSH_WEBSITE_URL", &mut self.website.url);

        // Session
        Self::apply_env_string("TELEPUSH_SECRET_KEY", &mut self.session.secret_key);
        Self::apply_env_parse(
            "TELEPUSH_SESSION_MAX_AGE_SECS",
            &mut self.session.max_age_secs,
        );

        Self::apply_env_bool("TELEPUSH_DEBUG", &mut self.debug);
    }

    fn apply_legacy_env(&mut self) {
        Self::apply_env_string("DATABASE_FILE", &mut self.database.path);
        Self::apply_env_option_string("LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("TELEGRAM_BOT_TOKEN", &mut self.telegram.bot_token);
        Self::apply_env_string("TELEGRAM_BOT_USERNAME", &mut self.telegram.bot_username);
        Self::apply_env_string("WEBSITE_URL", &mut self.website.url);
        Self::apply_env_string("SECRET_KEY", &mut self.session.secret_key);
        Self::apply_env_bool("QUART_DEBUG", &mut self.debug);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name)
            && !val.is_empty()
        {
            *target = Some(val);
        }
    }
}
