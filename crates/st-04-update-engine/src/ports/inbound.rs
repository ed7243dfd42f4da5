//! Inbound (Driving) Ports

use crate::domain::{EngineConfig, TickReport};

/// Primary API of the update engine (Driving Port)
///
/// `tick` is synchronous and never suspends, so two ticks cannot interleave
/// on one scheduler task.
pub trait UpdateEngineApi: Send + Sync {
    /// Runs one full tick: select, advance, commit, notify.
    fn tick(&self) -> TickReport;

    fn config(&self) -> &EngineConfig;

    /// Ticks run so far.
    fn ticks_run(&self) -> u64;
}
