use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use uuid::Uuid;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Per-request correlation data, stored in request extensions
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique correlation ID for this request
    pub correlation_id: String,
    /// Sequence number within this server instance
    pub request_seq: u64,
    /// Start time for latency tracking
    pub started_at: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        let request_seq = REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst);

        Self {
            correlation_id: format!("req-{}-{}", request_seq, Uuid::new_v4().as_simple()),
            request_seq,
            started_at: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Short prefix for log lines
    pub fn log_prefix(&self) -> String {
        let id = self
            .correlation_id
            .rsplit('-')
            .next()
            .unwrap_or(&self.correlation_id);
        format!("[req={} {}]", self.request_seq, &id[..8.min(id.len())])
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
