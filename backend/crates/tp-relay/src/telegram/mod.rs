pub mod bot_client;
pub mod error;
pub mod update;

pub use bot_client::TelegramBotClient;
pub use error::{Result, TelegramError};
pub use update::{Chat, Message, TelegramUser, Update};
