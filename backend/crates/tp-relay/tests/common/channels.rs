use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tp_relay::{DeliveryError, OutboundChannel, OutboundMessage};

/// Records every delivered message
#[derive(Default)]
pub struct RecordingChannel {
    delivered: Mutex<Vec<OutboundMessage>>,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutboundChannel for RecordingChannel {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Holds every delivery until `release` is called, then records it
pub struct GatedChannel {
    gate: Semaphore,
    inner: Arc<RecordingChannel>,
}

impl GatedChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            inner: RecordingChannel::new(),
        })
    }

    pub fn release(&self, deliveries: usize) {
        self.gate.add_permits(deliveries);
    }

    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.inner.delivered()
    }
}

#[async_trait]
impl OutboundChannel for GatedChannel {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| DeliveryError::transport(e.to_string()))?;
        permit.forget();
        self.inner.deliver(message).await
    }
}

/// Fails every delivery, counting attempts
#[derive(Default)]
pub struct FailingChannel {
    attempts: Mutex<usize>,
}

impl FailingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl OutboundChannel for FailingChannel {
    async fn deliver(&self, _message: &OutboundMessage) -> Result<(), DeliveryError> {
        *self.attempts.lock().unwrap() += 1;
        Err(DeliveryError::rejected("Bad Request: chat not found"))
    }
}
