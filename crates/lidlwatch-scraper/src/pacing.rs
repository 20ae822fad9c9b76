//! Outbound request pacing.
//!
//! The merchant blocks clients that hit it in quick bursts, so every request
//! to a host must start at least `interval` after the previous one to the same
//! host. [`RequestPacer`] hands out start slots per host; the slot is reserved
//! under a short lock and the caller sleeps outside it, so concurrent
//! resolutions queue up behind each other instead of firing together.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl RequestPacer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until a request to `host` may start.
    ///
    /// The first request to a host goes out immediately; each following one
    /// is spaced `interval` after the previously reserved slot.
    pub async fn wait(&self, host: &str) {
        if self.interval.is_zero() {
            return;
        }

        let slot = {
            let mut slots = self
                .next_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            let slot = slots.get(host).map_or(now, |&next| next.max(now));
            slots.insert(host.to_owned(), slot + self.interval);
            slot
        };

        let wait = slot.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            tracing::debug!(host, wait = ?wait, "pacing outbound request");
        }
        tokio::time::sleep_until(slot).await;
    }
}
