use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::runtime::Builder as TokioBuilder;
use tokio::sync::{oneshot, watch};
use tokio::time;

use crate::metrics::MetricsSeries;
use crate::poll::state::{SeriesState, ViewState};
use crate::prelude::{PollConfig, SeriesSource};
use crate::telemetry::{FetchRecorder, PollLog};

/// Gate consulted before every state write; closed once the session stops.
///
/// The write happens while the gate is held, so once `close` returns no
/// late-resolving fetch can still land in the view state.
struct SessionGate {
    active: Mutex<bool>,
}

impl SessionGate {
    fn new() -> Self {
        Self {
            active: Mutex::new(true),
        }
    }

    fn apply(&self, state: &ViewState, series: MetricsSeries) -> bool {
        let active = self.active.lock().unwrap();
        if *active {
            state.set(series);
            true
        } else {
            false
        }
    }

    fn is_open(&self) -> bool {
        *self.active.lock().unwrap()
    }

    fn close(&self) {
        *self.active.lock().unwrap() = false;
    }
}

struct SessionCore {
    source: Arc<dyn SeriesSource>,
    state: Arc<ViewState>,
    gate: Arc<SessionGate>,
    recorder: Arc<FetchRecorder>,
    log: PollLog,
}

/// One fetch attempt. Failures leave the view state untouched.
async fn run_tick(core: Arc<SessionCore>) {
    match core.source.fetch_series().await {
        Ok(series) => {
            if core.gate.apply(&core.state, series) {
                core.recorder.record_success();
            } else {
                core.log.record("discarded a fetch that resolved after stop");
            }
        }
        Err(err) => {
            core.recorder.record_failure(&err);
            core.log.record_failure(&format!("metrics fetch failed: {err}"));
        }
    }
}

/// Issues an immediate fetch, then one per interval until shutdown.
///
/// Fetches are spawned so a slow response never delays the next tick;
/// overlapping completions apply last-resolved-wins.
async fn drive(core: Arc<SessionCore>, interval: Duration, mut shutdown: oneshot::Receiver<()>) {
    let mut ticker = time::interval(interval);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if !core.gate.is_open() {
                    break;
                }
                tokio::spawn(run_tick(core.clone()));
            }
        }
    }
}

/// Owned polling lifecycle.
///
/// Constructing the session starts the timer; `stop` (or drop) cancels it
/// and guarantees no further state updates, even from a fetch still in
/// flight. One session, one timer: there is no second `start` to call.
pub struct PollSession {
    state: Arc<ViewState>,
    recorder: Arc<FetchRecorder>,
    gate: Arc<SessionGate>,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl PollSession {
    /// Starts polling on a dedicated thread with its own runtime.
    pub fn start(source: Arc<dyn SeriesSource>, config: PollConfig) -> Self {
        let state = Arc::new(ViewState::new());
        let recorder = Arc::new(FetchRecorder::new());
        let gate = Arc::new(SessionGate::new());
        let core = Arc::new(SessionCore {
            source,
            state: state.clone(),
            gate: gate.clone(),
            recorder: recorder.clone(),
            log: PollLog::new(),
        });

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let interval = config.interval;
        let worker = thread::spawn(move || {
            let runtime = TokioBuilder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(drive(core, interval, shutdown_rx));
        });

        Self {
            state,
            recorder,
            gate,
            shutdown: Some(shutdown_tx),
            worker: Some(worker),
        }
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Receiver observing every view-state replacement.
    pub fn subscribe(&self) -> watch::Receiver<SeriesState> {
        self.state.subscribe()
    }

    /// Fetch tally for operator diagnosis.
    pub fn recorder(&self) -> &FetchRecorder {
        &self.recorder
    }

    /// Stops polling. Safe to call with no fetch in flight, and idempotent.
    pub fn stop(&mut self) {
        self.gate.close();
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.stop();
    }
}
