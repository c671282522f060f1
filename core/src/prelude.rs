use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::metrics::MetricsSeries;

/// Cadence between fetch attempts when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Timing options for a polling session.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
}

impl PollConfig {
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Common error type for fetch attempts.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Future returned by a single fetch attempt.
pub type SeriesFuture<'a> = Pin<Box<dyn Future<Output = FetchResult<MetricsSeries>> + Send + 'a>>;

/// Trait describing where the metrics series comes from.
pub trait SeriesSource: Send + Sync {
    fn fetch_series(&self) -> SeriesFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_five_seconds() {
        assert_eq!(PollConfig::default().interval, Duration::from_millis(5000));
    }

    #[test]
    fn zero_interval_is_clamped() {
        assert_eq!(
            PollConfig::with_interval_ms(0).interval,
            Duration::from_millis(1)
        );
    }
}
