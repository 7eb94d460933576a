//! Background delivery of relayed messages.
//!
//! `submit` hands a message to an unbounded channel and returns at once.
//! A single worker task pulls messages off the channel and runs each
//! delivery concurrently in a `JoinSet`. Failures are logged and counted,
//! never retried and never reported back to the submitter.
//!
//! The worker exits once every `DeliveryQueue` handle is dropped and the
//! in-flight deliveries have finished, so awaiting [`DeliveryWorker::join`]
//! after dropping the handles flushes everything that was accepted.

use crate::{OutboundChannel, OutboundMessage, RelayError, RelayMetrics, Result as RelayErrorResult};

use std::panic::Location;
use std::sync::Arc;
use std::time::Instant;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

#[derive(Clone)]
pub struct DeliveryQueue {
    sender: mpsc::UnboundedSender<OutboundMessage>,
}

/// Handle to the background worker draining a [`DeliveryQueue`]
pub struct DeliveryWorker {
    handle: JoinHandle<usize>,
}

impl DeliveryQueue {
    /// Spawn the worker on the current tokio runtime.
    pub fn start(channel: Arc<dyn OutboundChannel>, metrics: RelayMetrics) -> (Self, DeliveryWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(receiver, channel, metrics));

        (Self { sender }, DeliveryWorker { handle })
    }

    /// Accept a message for delivery without waiting for it.
    #[track_caller]
    pub fn submit(&self, message: OutboundMessage) -> RelayErrorResult<()> {
        self.sender
            .send(message)
            .map_err(|_| RelayError::QueueClosed {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl DeliveryWorker {
    /// Stop the worker, abandoning queued and in-flight deliveries
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the worker to drain. Returns how many deliveries it attempted.
    pub async fn join(self) -> usize {
        match self.handle.await {
            Ok(attempted) => attempted,
            Err(e) if e.is_cancelled() => {
                warn!("Delivery worker aborted; pending deliveries dropped");
                0
            }
            Err(e) => {
                error!("Delivery worker terminated abnormally: {}", e);
                0
            }
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<OutboundMessage>,
    channel: Arc<dyn OutboundChannel>,
    metrics: RelayMetrics,
) -> usize {
    let mut in_flight = JoinSet::new();
    let mut attempted = 0usize;

    loop {
        tokio::select! {
            received = receiver.recv() => match received {
                Some(message) => {
                    attempted += 1;
                    let channel = Arc::clone(&channel);
                    let metrics = metrics.clone();
                    in_flight.spawn(deliver_one(channel, metrics, message));
                }
                None => break,
            },
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                log_join_failure(joined);
            }
        }
    }

    if !in_flight.is_empty() {
        info!("Draining {} pending deliveries", in_flight.len());
    }
    while let Some(joined) = in_flight.join_next().await {
        log_join_failure(joined);
    }

    debug!("Delivery worker stopped after {} deliveries", attempted);
    attempted
}

async fn deliver_one(channel: Arc<dyn OutboundChannel>, metrics: RelayMetrics, message: OutboundMessage) {
    let started = Instant::now();

    match channel.deliver(&message).await {
        Ok(()) => {
            debug!("Delivered message to chat {}", message.chat_id);
            metrics.delivery_succeeded(started.elapsed());
        }
        Err(e) => {
            warn!("Delivery to chat {} failed: {}", message.chat_id, e);
            metrics.delivery_failed();
        }
    }
}

fn log_join_failure(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!("Delivery task panicked: {}", e);
    }
}
