//! Tick Scheduler
//!
//! Drives an engine on a fixed period from a single tokio task. Ticks run
//! back to back on that task and never overlap; a tick that overruns the
//! period causes the missed firings to be skipped, not queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::TickReport;
use crate::ports::UpdateEngineApi;

pub struct TickScheduler;

impl TickScheduler {
    /// Starts ticking `engine` every `period`. The first tick fires one full
    /// period after the call.
    pub fn spawn<E>(engine: Arc<E>, period: Duration) -> SchedulerHandle
    where
        E: UpdateEngineApi + ?Sized + 'static,
    {
        Self::spawn_with(engine, period, |_| {})
    }

    /// Like `spawn`, handing every report to `on_tick`.
    pub fn spawn_with<E, F>(engine: Arc<E>, period: Duration, mut on_tick: F) -> SchedulerHandle
    where
        E: UpdateEngineApi + ?Sized + 'static,
        F: FnMut(TickReport) + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(period_ms = period.as_millis() as u64, "Tick scheduler started");

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => on_tick(engine.tick()),
                }
            }
            debug!("Tick scheduler stopped");
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Owner of a running scheduler. Dropping it also stops the task.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stops the scheduler. No tick starts after this returns; a tick
    /// already running completes since ticks do not suspend.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Signals shutdown and waits for the task to exit on its own.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
