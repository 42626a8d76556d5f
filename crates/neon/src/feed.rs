//! Polling a plain-text "latest update" feed.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::fetch;
use crate::poll::Poller;

/// Remembers the last update seen so each one is announced once.
#[derive(Debug, Default)]
pub struct UpdateTracker {
    last_seen: Option<String>,
}

impl UpdateTracker {
    /// Feed a response body; returns the update to announce, if it is new.
    ///
    /// Only the first line counts, trimmed. Blank first lines are ignored.
    pub fn observe(&mut self, body: &str) -> Option<String> {
        let line = body.lines().next()?.trim();
        if line.is_empty() || self.last_seen.as_deref() == Some(line) {
            return None;
        }
        self.last_seen = Some(line.to_string());
        Some(line.to_string())
    }

    #[cfg(test)]
    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }
}

/// Fetches the feed on a background thread and queues new updates.
#[derive(Debug)]
pub struct FeedMonitor {
    pending: Arc<RwLock<Vec<String>>>,
    poller: Poller,
}

impl FeedMonitor {
    pub fn start(url: String, interval: Duration) -> Self {
        let pending = Arc::new(RwLock::new(Vec::new()));
        let queue = pending.clone();
        let agent = fetch::agent();
        let mut tracker = UpdateTracker::default();

        let poller = Poller::spawn(interval, move || match fetch::fetch_text(&agent, &url) {
            Ok(body) => {
                if let Some(update) = tracker.observe(&body)
                    && let Ok(mut queue) = queue.write()
                {
                    log::info!("New update: {}", update);
                    queue.push(update);
                }
            }
            Err(e) => log::warn!("Update feed fetch failed: {}", e),
        });

        Self { pending, poller }
    }

    /// Take queued updates. Returns nothing while the poller holds the lock;
    /// they are picked up next frame.
    pub fn drain(&self) -> Vec<String> {
        match self.pending.try_write() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    pub fn stop(&self) {
        self.poller.stop();
    }
}
