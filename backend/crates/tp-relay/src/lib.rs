pub mod delivery_queue;
pub mod error;
pub mod metrics;
pub mod outbound;
pub mod registration;
pub mod relay;
pub mod telegram;

pub use delivery_queue::{DeliveryQueue, DeliveryWorker};
pub use error::{RelayError, Result};
pub use metrics::RelayMetrics;
pub use outbound::{DeliveryError, OutboundChannel, OutboundMessage, ParseMode};
pub use registration::{ContactOutcome, LoginOutcome, PlatformContact, RegistrationFlow};
pub use relay::RelayService;
pub use telegram::{Chat, Message, TelegramBotClient, TelegramError, TelegramUser, Update};
