//! Per-tick outcome reporting.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{ShipmentId, Timestamp};

/// Why a selected shipment was not advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Origin, destination or current location is out of range.
    InvalidCoordinate,
    /// The shipment left the table between snapshot and commit.
    StaleReference,
    /// The shipment was delivered between snapshot and commit.
    AlreadyDelivered,
    /// The shipment was edited between snapshot and commit; the edit won.
    Superseded,
}

impl SkipReason {
    pub const ALL: [SkipReason; 4] = [
        SkipReason::InvalidCoordinate,
        SkipReason::StaleReference,
        SkipReason::AlreadyDelivered,
        SkipReason::Superseded,
    ];

    /// Wire name (`invalid_coordinate`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate => "invalid_coordinate",
            Self::StaleReference => "stale_reference",
            Self::AlreadyDelivered => "already_delivered",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::InvalidCoordinate => "invalid coordinate",
            Self::StaleReference => "stale reference",
            Self::AlreadyDelivered => "already delivered",
            Self::Superseded => "superseded by an edit",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedShipment {
    pub id: ShipmentId,
    pub reason: SkipReason,
}

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based tick sequence number for this engine.
    pub tick: u64,
    pub timestamp: Timestamp,
    /// Active shipments in the snapshot.
    pub selected: usize,
    /// Deltas computed.
    pub advanced: usize,
    /// Status transitions among the committed deltas.
    pub transitions: usize,
    pub skipped: Vec<SkippedShipment>,
    /// Deltas the store applied.
    pub committed: usize,
    /// Deltas dropped at commit because their id was gone.
    pub stale: usize,
    /// Notifications appended by the sink.
    pub notifications: usize,
}

impl TickReport {
    pub fn new(tick: u64, timestamp: Timestamp) -> Self {
        Self {
            tick,
            timestamp,
            ..Self::default()
        }
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    /// True when the tick selected nothing.
    pub fn is_idle(&self) -> bool {
        self.selected == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_for() {
        let mut report = TickReport::new(3, 10);
        report.skipped.push(SkippedShipment {
            id: ShipmentId::new("a"),
            reason: SkipReason::InvalidCoordinate,
        });
        report.skipped.push(SkippedShipment {
            id: ShipmentId::new("b"),
            reason: SkipReason::StaleReference,
        });
        assert_eq!(report.skipped_for(SkipReason::InvalidCoordinate), 1);
        assert_eq!(report.skipped_for(SkipReason::AlreadyDelivered), 0);
        assert!(report.is_idle());
        assert_eq!(SkipReason::StaleReference.to_string(), "stale reference");
        assert_eq!(SkipReason::AlreadyDelivered.as_str(), "already_delivered");
        assert_eq!(SkipReason::Superseded.as_str(), "superseded");
    }
}
