//! Outbound (Driven) Ports

use std::sync::atomic::{AtomicU64, Ordering};

use shared_types::{Shipment, ShipmentDelta, ShipmentId, Timestamp, TransitionEvent};
use st_02_shipment_store::CommitOutcome;

/// Shipment table access (Driven Port)
pub trait ShipmentRepository: Send + Sync {
    /// Every record, in id-list order, from one consistent read.
    fn snapshot(&self) -> Vec<Shipment>;

    fn get(&self, id: &ShipmentId) -> Option<Shipment>;

    /// Applies all deltas as one atomic write.
    fn commit_batch(&self, deltas: Vec<ShipmentDelta>, now: Timestamp) -> CommitOutcome;
}

/// Receiver of status transitions (Driven Port)
pub trait NotificationSink: Send + Sync {
    /// Returns the number of notifications appended.
    fn emit(&self, events: Vec<TransitionEvent>) -> usize;

    /// Called after every commit, before `emit`.
    fn batch_committed(&self, _tick: u64, _outcome: &CommitOutcome, _now: Timestamp) {}
}

/// Time source abstraction for testability (Driven Port)
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually driven clock for deterministic runs.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}
