//! Polling the JSON statistics document for the status line.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Local;
use serde_json::Value;

use crate::fetch;
use crate::poll::Poller;

/// Longest value shown for a single field.
const MAX_VALUE_WIDTH: usize = 24;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatsStatus {
    /// No response yet.
    #[default]
    Pending,
    Online {
        fields: Vec<(String, String)>,
        /// Local time of the last successful poll.
        updated: String,
    },
    /// The last poll failed.
    Offline,
}

impl StatsStatus {
    pub fn line(&self) -> String {
        match self {
            StatsStatus::Pending => "stats: connecting…".to_string(),
            StatsStatus::Online { fields, updated } => {
                let body = fields
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join("  ");
                format!("{body}  ({updated})")
            }
            StatsStatus::Offline => "stats: offline".to_string(),
        }
    }
}

/// Top-level scalar fields of a JSON object, as display strings.
///
/// Nested objects, arrays and nulls are skipped. A non-object document
/// has no fields.
pub fn summarize(document: &Value) -> Vec<(String, String)> {
    let Some(object) = document.as_object() else {
        return Vec::new();
    };
    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.clone(), truncate(&text)))
        })
        .collect()
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_VALUE_WIDTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(MAX_VALUE_WIDTH - 1).collect();
    short.push('…');
    short
}

/// Fetches the statistics document on a background thread.
#[derive(Debug)]
pub struct StatsMonitor {
    status: Arc<RwLock<StatsStatus>>,
    /// Cached status for when the lock is contended.
    cached: Arc<RwLock<StatsStatus>>,
    poller: Poller,
}

impl StatsMonitor {
    pub fn start(url: String, interval: Duration) -> Self {
        let status = Arc::new(RwLock::new(StatsStatus::Pending));
        let cached = Arc::new(RwLock::new(StatsStatus::Pending));
        let (status_w, cached_w) = (status.clone(), cached.clone());
        let agent = fetch::agent();

        let poller = Poller::spawn(interval, move || {
            let next = match fetch::fetch_json(&agent, &url) {
                Ok(document) => StatsStatus::Online {
                    fields: summarize(&document),
                    updated: Local::now().format("%H:%M:%S").to_string(),
                },
                Err(e) => {
                    log::warn!("Stats fetch failed: {}", e);
                    StatsStatus::Offline
                }
            };
            if let Ok(mut s) = status_w.write() {
                *s = next.clone();
            }
            if let Ok(mut c) = cached_w.write() {
                *c = next;
            }
        });

        Self {
            status,
            cached,
            poller,
        }
    }

    /// Current status without blocking on the poller.
    pub fn status(&self) -> StatsStatus {
        if let Ok(status) = self.status.try_read() {
            return status.clone();
        }
        if let Ok(cached) = self.cached.read() {
            return cached.clone();
        }
        StatsStatus::Offline
    }

    pub fn stop(&self) {
        self.poller.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_scalars_only() {
        let doc = json!({
            "visitors": 1204,
            "status": "building",
            "online": true,
            "nested": { "a": 1 },
            "list": [1, 2],
            "missing": null,
        });
        assert_eq!(
            summarize(&doc),
            vec![
                ("online".to_string(), "true".to_string()),
                ("status".to_string(), "building".to_string()),
                ("visitors".to_string(), "1204".to_string()),
            ]
        );
    }

    #[test]
    fn test_summarize_non_object() {
        assert!(summarize(&json!([1, 2, 3])).is_empty());
        assert!(summarize(&json!("text")).is_empty());
    }

    #[test]
    fn test_long_values_truncated() {
        let doc = json!({ "motd": "x".repeat(40) });
        let fields = summarize(&doc);
        assert_eq!(fields[0].1.chars().count(), MAX_VALUE_WIDTH);
        assert!(fields[0].1.ends_with('…'));
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(StatsStatus::Offline.line(), "stats: offline");
        let online = StatsStatus::Online {
            fields: vec![("stars".into(), "42".into()), ("forks".into(), "7".into())],
            updated: "12:00:00".into(),
        };
        assert_eq!(online.line(), "stars: 42  forks: 7  (12:00:00)");
    }
}
