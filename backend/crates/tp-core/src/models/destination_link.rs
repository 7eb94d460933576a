use crate::{ChatId, SendKey};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a user's relayed messages go, and the key that unlocks it.
///
/// The chat and the key are assigned together, exactly once, so they live
/// in one value: a user either has both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationLink {
    pub chat_id: ChatId,
    pub send_key: SendKey,
    pub linked_at: DateTime<Utc>,
}
