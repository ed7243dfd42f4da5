//! Engine counters
//!
//! Lock-free totals across all ticks of one engine. Exporters read them
//! through `snapshot()`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::TickReport;

#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub ticks: AtomicU64,
    pub shipments_advanced: AtomicU64,
    pub transitions: AtomicU64,
    pub skipped: AtomicU64,
    pub stale: AtomicU64,
    pub notifications: AtomicU64,
    /// Cumulative tick time in nanoseconds
    pub tick_time_ns: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&self, report: &TickReport, elapsed: Duration) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.shipments_advanced
            .fetch_add(report.committed as u64, Ordering::Relaxed);
        self.transitions
            .fetch_add(report.transitions as u64, Ordering::Relaxed);
        self.skipped
            .fetch_add(report.skipped.len() as u64, Ordering::Relaxed);
        self.stale.fetch_add(report.stale as u64, Ordering::Relaxed);
        self.notifications
            .fetch_add(report.notifications as u64, Ordering::Relaxed);
        self.tick_time_ns
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> EngineMetricsSnapshot {
        EngineMetricsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            shipments_advanced: self.shipments_advanced.load(Ordering::Relaxed),
            transitions: self.transitions.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            notifications: self.notifications.load(Ordering::Relaxed),
            tick_time_ns: self.tick_time_ns.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.shipments_advanced.store(0, Ordering::Relaxed);
        self.transitions.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.stale.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
        self.tick_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of `EngineMetrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetricsSnapshot {
    pub ticks: u64,
    pub shipments_advanced: u64,
    pub transitions: u64,
    pub skipped: u64,
    pub stale: u64,
    pub notifications: u64,
    pub tick_time_ns: u64,
}

impl EngineMetricsSnapshot {
    pub fn avg_tick_time_ns(&self) -> u64 {
        if self.ticks == 0 {
            0
        } else {
            self.tick_time_ns / self.ticks
        }
    }
}
