use crate::{
    DeliveryQueue, OutboundMessage, RelayError, RelayMetrics, Result as RelayErrorResult,
};

use std::sync::Arc;

use log::{debug, warn};
use tp_db::KeyStore;

/// Key-scoped message relay. The send key is the only credential.
#[derive(Clone)]
pub struct RelayService {
    store: Arc<dyn KeyStore>,
    queue: DeliveryQueue,
    metrics: RelayMetrics,
}

impl RelayService {
    pub fn new(store: Arc<dyn KeyStore>, queue: DeliveryQueue, metrics: RelayMetrics) -> Self {
        Self {
            store,
            queue,
            metrics,
        }
    }

    /// Accept `text` for delivery to the chat linked to `send_key`.
    ///
    /// Returns once the message is queued; delivery outcome is not reported.
    pub async fn send(&self, send_key: &str, text: &str) -> RelayErrorResult<()> {
        if send_key.is_empty() || text.is_empty() {
            self.metrics.send_rejected("bad_request");
            return Err(RelayError::bad_request("Both 'key' and 'text' are required"));
        }

        let Some(user) = self.store.get_by_send_key(send_key).await? else {
            warn!("Send rejected: no user for the given key");
            self.metrics.send_rejected("unauthorized");
            return Err(RelayError::unauthorized("No such user"));
        };

        let Some(link) = user.link else {
            // get_by_send_key only finds linked users
            self.metrics.send_rejected("unauthorized");
            return Err(RelayError::unauthorized("No such user"));
        };

        self.queue
            .submit(OutboundMessage::markdown(link.chat_id, text))?;

        debug!(
            "Queued message for user {} with key {}",
            user.id,
            link.send_key.redacted()
        );
        self.metrics.send_accepted();

        Ok(())
    }
}
