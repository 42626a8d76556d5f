//! Background polling thread shared by the feed and stats monitors.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

/// How often the thread wakes to check whether it should stop.
const WAKE_INTERVAL: Duration = Duration::from_millis(250);

/// Runs a job immediately and then every `interval` until stopped or dropped.
#[derive(Debug)]
pub struct Poller {
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl Poller {
    pub fn spawn<F>(interval: Duration, mut job: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let running = Arc::new(RwLock::new(true));
        let flag = running.clone();

        thread::spawn(move || {
            job();
            let mut last_run = Instant::now();

            loop {
                if let Ok(is_running) = flag.read()
                    && !*is_running
                {
                    break;
                }

                if last_run.elapsed() >= interval {
                    job();
                    last_run = Instant::now();
                }

                thread::sleep(WAKE_INTERVAL.min(interval));
            }
        });

        Self { running }
    }

    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.read().map(|r| *r).unwrap_or(false)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
