use tokio::sync::watch;

use crate::metrics::{MetricSample, MetricsSeries};

/// Value held by the view state.
///
/// `Empty` means no fetch has succeeded yet. `Populated` holds the last
/// successfully fetched series, which may itself have zero samples. There is
/// no transition back to `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeriesState {
    #[default]
    Empty,
    Populated(MetricsSeries),
}

impl SeriesState {
    /// Samples to render, an empty slice until the first successful fetch.
    pub fn samples(&self) -> &[MetricSample] {
        match self {
            SeriesState::Empty => &[],
            SeriesState::Populated(series) => series,
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(self, SeriesState::Populated(_))
    }
}

/// The single current series exposed to the rendering surface.
///
/// `set` replaces the held series wholesale and notifies subscribers. It
/// performs no validation; shape is enforced at the fetch boundary.
#[derive(Debug)]
pub struct ViewState {
    tx: watch::Sender<SeriesState>,
}

impl ViewState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SeriesState::Empty);
        Self { tx }
    }

    /// Snapshot of the current state. Never blocks, never fails.
    pub fn get(&self) -> SeriesState {
        self.tx.borrow().clone()
    }

    /// Replaces the held series and notifies subscribers.
    pub fn set(&self, series: MetricsSeries) {
        self.tx.send_replace(SeriesState::Populated(series));
    }

    /// Receiver observing every replacement.
    pub fn subscribe(&self) -> watch::Receiver<SeriesState> {
        self.tx.subscribe()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series(rounds: u64) -> MetricsSeries {
        (1..=rounds)
            .map(|round| MetricSample::new(round, 0.9 / round as f64, 0.1 * round as f64, 1.0))
            .collect()
    }

    #[test]
    fn set_replaces_the_series_wholesale() {
        let state = ViewState::new();
        state.set(sample_series(3));
        state.set(sample_series(1));
        assert_eq!(state.get(), SeriesState::Populated(sample_series(1)));
    }

    #[test]
    fn get_is_idempotent() {
        let state = ViewState::new();
        state.set(sample_series(2));
        assert_eq!(state.get(), state.get());
    }

    #[test]
    fn empty_fetch_is_distinct_from_never_fetched() {
        let state = ViewState::new();
        assert!(!state.get().is_populated());
        assert!(state.get().samples().is_empty());

        state.set(MetricsSeries::new());
        assert!(state.get().is_populated());
        assert!(state.get().samples().is_empty());
    }

    #[test]
    fn subscribers_observe_replacements() {
        let state = ViewState::new();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.set(sample_series(1));
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            SeriesState::Populated(sample_series(1))
        );
    }
}
