pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::chat_id::ChatId;
pub use models::destination_link::DestinationLink;
pub use models::send_key::{SEND_KEY_LENGTH, SendKey};
pub use models::user::User;

#[cfg(test)]
mod tests;
