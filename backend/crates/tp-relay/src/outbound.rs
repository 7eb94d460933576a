use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;
use tp_core::ChatId;

/// How the platform should interpret message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

/// A text message addressed to one chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub parse_mode: ParseMode,
}

impl OutboundMessage {
    /// Relayed messages are always sent as Markdown, text unmodified
    pub fn markdown(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: ParseMode::Markdown,
        }
    }
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Delivery transport failed: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Delivery rejected by platform: {message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },
}

impl DeliveryError {
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Delivers text to the messaging platform.
#[async_trait]
pub trait OutboundChannel: Send + Sync {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError>;
}
