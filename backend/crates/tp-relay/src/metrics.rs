use std::time::Duration;

use metrics::{counter, histogram};

/// Metrics collector for registration and relay operations
#[derive(Clone)]
pub struct RelayMetrics {
    prefix: &'static str,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "telepush",
        }
    }

    pub fn login_succeeded(&self) {
        counter!(format!("{}.logins.succeeded", self.prefix)).increment(1);
    }

    pub fn login_rejected(&self, reason: &str) {
        counter!(format!("{}.logins.rejected", self.prefix)).increment(1);
        counter!(format!("{}.logins.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record a platform contact event by outcome (linked, already_linked, unknown_user)
    pub fn contact_handled(&self, outcome: &str) {
        counter!(format!("{}.contacts.{}", self.prefix, outcome)).increment(1);
    }

    pub fn send_accepted(&self) {
        counter!(format!("{}.sends.accepted", self.prefix)).increment(1);
    }

    pub fn send_rejected(&self, reason: &str) {
        counter!(format!("{}.sends.rejected", self.prefix)).increment(1);
        counter!(format!("{}.sends.rejected.{}", self.prefix, reason)).increment(1);
    }

    pub fn delivery_succeeded(&self, duration: Duration) {
        counter!(format!("{}.deliveries.succeeded", self.prefix)).increment(1);
        histogram!(format!("{}.deliveries.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    pub fn delivery_failed(&self) {
        counter!(format!("{}.deliveries.failed", self.prefix)).increment(1);
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
