use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] tp_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] tp_db::DbError),

    #[error("Telegram client error: {0}")]
    Telegram(#[from] tp_relay::TelegramError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
