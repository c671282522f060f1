use std::sync::Mutex;

use crate::prelude::FetchError;

/// Running tally of fetch outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchTally {
    pub succeeded: usize,
    pub failed: usize,
    pub last_failure: Option<String>,
}

/// Records fetch outcomes for operator diagnosis.
pub struct FetchRecorder {
    inner: Mutex<FetchTally>,
}

impl FetchRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FetchTally::default()),
        }
    }

    pub fn record_success(&self) {
        if let Ok(mut tally) = self.inner.lock() {
            tally.succeeded += 1;
        }
    }

    pub fn record_failure(&self, error: &FetchError) {
        if let Ok(mut tally) = self.inner.lock() {
            tally.failed += 1;
            tally.last_failure = Some(error.to_string());
        }
    }

    pub fn snapshot(&self) -> FetchTally {
        if let Ok(tally) = self.inner.lock() {
            tally.clone()
        } else {
            FetchTally::default()
        }
    }
}

impl Default for FetchRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_tracks_both_outcomes() {
        let recorder = FetchRecorder::new();
        recorder.record_success();
        recorder.record_failure(&FetchError::Status(503));
        recorder.record_success();

        let tally = recorder.snapshot();
        assert_eq!(tally.succeeded, 2);
        assert_eq!(tally.failed, 1);
        assert_eq!(tally.last_failure.as_deref(), Some("unexpected status 503"));
    }

    #[test]
    fn fresh_recorder_has_empty_tally() {
        assert_eq!(FetchRecorder::new().snapshot(), FetchTally::default());
    }
}
