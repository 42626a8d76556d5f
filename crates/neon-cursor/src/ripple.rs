use std::time::{Duration, Instant};

use glam::Vec2;

/// Expanding ring left where the pointer was pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub origin: Vec2,
    pub started: Instant,
}

impl Ripple {
    pub fn new(origin: Vec2, started: Instant) -> Self {
        Self { origin, started }
    }

    /// 0.0 at the press, 1.0 once `duration` has passed.
    pub fn progress(&self, now: Instant, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant, duration: Duration) -> bool {
        self.progress(now, duration) >= 1.0
    }
}
