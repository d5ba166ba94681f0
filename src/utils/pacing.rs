// src/utils/pacing.rs

//! Fixed delays between requests to the origin site.

use std::time::Duration;

/// Minimum intervals awaited between network-bound steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    /// Awaited after each candidate that reached the network
    pub item: Duration,
    /// Awaited after each registration call inside one candidate
    pub request: Duration,
}

impl Pacing {
    pub fn new(item: Duration, request: Duration) -> Self {
        Self { item, request }
    }

    /// No delays at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub async fn after_item(&self) {
        pause(self.item).await;
    }

    pub async fn after_request(&self) {
        pause(self.request).await;
    }
}

async fn pause(delay: Duration) {
    if delay.as_millis() > 0 {
        tokio::time::sleep(delay).await;
    }
}
