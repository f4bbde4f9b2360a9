//! Polling loop controller
//!
//! Drives capture -> diff -> report at a fixed interval and holds the
//! previous snapshot between iterations. The wait is not compensated for
//! iteration time, so the effective period is interval + iteration cost.

use crate::{capture, report, EventSink, IgnoreRules, IterationSummary, Result};
use dirwatch_core::{diff, Snapshot};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Rolling state carried from one iteration to the next
#[derive(Debug, Clone)]
pub struct WatcherState {
    previous: Snapshot,
}

impl WatcherState {
    /// Start from a baseline snapshot; the baseline itself is never reported
    pub fn new(baseline: Snapshot) -> Self {
        Self { previous: baseline }
    }

    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    fn replace(&mut self, current: Snapshot) {
        self.previous = current;
    }
}

/// Lifecycle of a [`PollingWatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
    Stopped,
}

/// Why a loop that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Cancellation was observed
    Interrupted,
}

/// Polling directory watcher
///
/// One iteration runs to completion before the next wait begins; the wait
/// is the only point where cancellation is observed mid-run.
pub struct PollingWatcher<S: EventSink> {
    /// Directory being watched
    directory: PathBuf,

    /// Wait between the end of one iteration and the start of the next
    interval: Duration,

    /// Filenames never tracked
    ignore: IgnoreRules,

    /// Destination for detected events
    sink: S,

    phase: Phase,
}

impl<S: EventSink> PollingWatcher<S> {
    pub fn new(directory: PathBuf, interval: Duration, ignore: IgnoreRules, sink: S) -> Self {
        Self {
            directory,
            interval,
            ignore,
            sink,
            phase: Phase::Initializing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the baseline snapshot without reporting anything
    pub fn initialize(&mut self) -> Result<WatcherState> {
        let baseline = capture(&self.directory, &self.ignore)?;
        info!(
            "Baseline for {}: {} files",
            self.directory.display(),
            baseline.len()
        );
        self.phase = Phase::Running;
        Ok(WatcherState::new(baseline))
    }

    /// Run one capture -> diff -> report -> replace cycle
    ///
    /// A capture failure leaves `state` untouched and reports nothing.
    pub fn iterate(&mut self, state: &mut WatcherState) -> Result<IterationSummary> {
        let current = capture(&self.directory, &self.ignore)?;
        let changes = diff(state.previous(), &current);
        let summary = report(&self.directory, &changes, &mut self.sink);
        state.replace(current);
        Ok(summary)
    }

    /// Take the baseline and run until `cancel` fires or the directory
    /// becomes unavailable
    ///
    /// Returns `Ok(StopReason::Interrupted)` on cancellation and the fatal
    /// error otherwise. Either way the watcher ends in [`Phase::Stopped`].
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<StopReason> {
        self.run_with(cancel, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_ready` once the baseline is taken
    ///
    /// `on_ready` is skipped when cancellation arrives during the baseline.
    pub async fn run_with<F>(&mut self, cancel: CancellationToken, on_ready: F) -> Result<StopReason>
    where
        F: FnOnce(&WatcherState),
    {
        if cancel.is_cancelled() {
            return Ok(self.stop());
        }

        let state = match self.initialize() {
            Ok(state) => state,
            Err(e) => return Err(self.fail(e)),
        };

        if cancel.is_cancelled() {
            return Ok(self.stop());
        }
        on_ready(&state);

        self.poll(state, cancel).await
    }

    async fn poll(&mut self, mut state: WatcherState, cancel: CancellationToken) -> Result<StopReason> {
        info!(
            "Watching {} (interval: {:?})",
            self.directory.display(),
            self.interval
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            match self.iterate(&mut state) {
                Ok(summary) if summary.total() > 0 => {
                    debug!(
                        "Iteration: {} created, {} modified, {} deleted, {} unreadable",
                        summary.created, summary.modified, summary.deleted, summary.read_failures
                    );
                }
                Ok(_) => trace!("Iteration: no changes"),
                Err(e) if e.is_fatal() => return Err(self.fail(e)),
                Err(e) => warn!("Iteration skipped: {}", e),
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        Ok(self.stop())
    }

    fn stop(&mut self) -> StopReason {
        self.phase = Phase::Stopped;
        info!("Stopped watching {}", self.directory.display());
        StopReason::Interrupted
    }

    fn fail(&mut self, err: crate::WatchError) -> crate::WatchError {
        error!("Watcher stopping: {}", err);
        self.phase = Phase::Stopped;
        err
    }
}
