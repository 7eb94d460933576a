use crate::DeliveryError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors talking to the Telegram Bot API
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Bot API error: {description} (status: {status}) {location}")]
    Api {
        status: u16,
        description: String,
        location: ErrorLocation,
    },
}

impl TelegramError {
    /// Convert reqwest error with context.
    ///
    /// The request URL embeds the bot token, so it is stripped from the message.
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let err = err.without_url();
        TelegramError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn api(status: u16, description: impl Into<String>) -> Self {
        TelegramError::Api {
            status,
            description: description.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for TelegramError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        TelegramError::from_reqwest(err)
    }
}

impl From<TelegramError> for DeliveryError {
    #[track_caller]
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Http { message, .. } => DeliveryError::transport(message),
            TelegramError::Api {
                status,
                description,
                ..
            } => DeliveryError::rejected(format!("{} ({})", description, status)),
        }
    }
}

pub type Result<T> = std::result::Result<T, TelegramError>;
