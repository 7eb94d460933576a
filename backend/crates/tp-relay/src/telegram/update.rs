//! The subset of Bot API update objects the webhook understands.
//! Unknown fields are ignored.

use crate::PlatformContact;

use serde::Deserialize;
use tp_core::ChatId;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<TelegramUser>,
    pub chat: Chat,
    pub text: Option<String>,
    /// Domain the user logged in to with the login widget
    pub connected_website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

impl Update {
    /// The contact signal, if this update reports a connected website
    pub fn contact(&self) -> Option<PlatformContact> {
        let message = self.message.as_ref()?;
        if message.connected_website.is_none() {
            return None;
        }
        let from = message.from.as_ref()?;

        Some(PlatformContact {
            user_id: from.id,
            chat_id: ChatId(message.chat.id),
        })
    }
}
