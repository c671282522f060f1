use log::{info, warn};

/// Thin sink for poll lifecycle records.
#[derive(Debug, Clone)]
pub struct PollLog;

impl PollLog {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn record_failure(&self, message: &str) {
        warn!("{}", message);
    }
}

impl Default for PollLog {
    fn default() -> Self {
        Self::new()
    }
}
