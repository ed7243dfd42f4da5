//! # Cross-Crate Contracts
//!
//! Values produced by the update engine and consumed by the shipment store
//! and the notification log.
//!
//! ```text
//! UpdateEngine ──Vec<ShipmentDelta>──→ ShipmentStore::commit_batch (atomic)
//!      │
//!      └────Vec<TransitionEvent>───→ NotificationSink::emit
//! ```

use serde::{Deserialize, Serialize};

use crate::entities::{
    Location, Shipment, ShipmentId, ShipmentStatus, StatusHistoryEntry, Timestamp,
};

/// The fields a delta was computed from.
///
/// A commit only applies a delta while the record still holds these values,
/// so an edit landing between snapshot and commit is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaBase {
    pub status: ShipmentStatus,
    pub current_location: Location,
}

impl DeltaBase {
    pub fn of(shipment: &Shipment) -> Self {
        Self {
            status: shipment.status,
            current_location: shipment.current_location.clone(),
        }
    }

    /// Returns true if `shipment` is unchanged since this base was taken.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.status == shipment.status && self.current_location == shipment.current_location
    }
}

/// The record change computed for one shipment in one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDelta {
    pub id: ShipmentId,
    /// What the engine read before computing this delta.
    pub base: DeltaBase,
    pub current_location: Location,
    pub status: ShipmentStatus,
    pub updated_at: Timestamp,
    /// Set only on the tick the shipment is delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<Timestamp>,
    /// Appended to `status_history` when the status changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_entry: Option<StatusHistoryEntry>,
}

impl ShipmentDelta {
    /// Returns true if this delta carries a status change.
    pub fn is_transition(&self) -> bool {
        self.history_entry.is_some()
    }
}

/// A status transition fired by the update engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub shipment_id: ShipmentId,
    /// The status entered on this tick.
    pub status: ShipmentStatus,
    pub tracking_number: String,
    /// Where the shipment is headed, already formatted for display.
    pub destination_label: String,
    pub timestamp: Timestamp,
}
