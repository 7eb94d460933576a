//! User entity - one Telegram identity that logged in through the widget.

use crate::{CoreError, DestinationLink, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A user is created on first login and linked to a chat later,
/// when the bot reports that the user connected the website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Telegram user id (primary key, never changes)
    pub id: i64,
    /// Display name captured at creation
    pub first_name: String,
    /// `None` while registration is pending
    pub link: Option<DestinationLink>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user that has authenticated but is not linked to a chat yet
    #[track_caller]
    pub fn pending(id: i64, first_name: impl Into<String>) -> CoreErrorResult<Self> {
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "first_name cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            id,
            first_name,
            link: None,
            created_at: Utc::now(),
        })
    }

    /// Authenticated but not yet linked to a delivery destination
    pub fn is_pending(&self) -> bool {
        self.link.is_none()
    }
}
