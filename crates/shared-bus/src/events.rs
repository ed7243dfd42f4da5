//! # Tracking Events
//!
//! Everything the simulation core announces to the outside.

use serde::{Deserialize, Serialize};
use shared_types::{ShipmentId, ShipmentStatus, Timestamp, TransitionEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackingEvent {
    // =========================================================================
    // UPDATE ENGINE
    // =========================================================================
    /// One tick's batch was written to the store.
    BatchCommitted {
        tick: u64,
        applied: usize,
        stale: usize,
        timestamp: Timestamp,
    },

    /// A shipment crossed a status threshold.
    StatusTransition(TransitionEvent),

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================
    /// An entry was appended to the notification log.
    NotificationAdded {
        notification_id: String,
        shipment_id: ShipmentId,
        title: String,
        message: String,
        timestamp: Timestamp,
    },
}

impl TrackingEvent {
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::BatchCommitted { .. } => EventTopic::Engine,
            Self::StatusTransition(_) => EventTopic::Shipments,
            Self::NotificationAdded { .. } => EventTopic::Notifications,
        }
    }

    /// The shipment this event is about, if it concerns just one.
    #[must_use]
    pub fn shipment_id(&self) -> Option<&ShipmentId> {
        match self {
            Self::BatchCommitted { .. } => None,
            Self::StatusTransition(event) => Some(&event.shipment_id),
            Self::NotificationAdded { shipment_id, .. } => Some(shipment_id),
        }
    }

    /// Returns true for a transition into `status`.
    #[must_use]
    pub fn is_transition_to(&self, status: ShipmentStatus) -> bool {
        matches!(self, Self::StatusTransition(event) if event.status == status)
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Batch bookkeeping from the engine.
    Engine,
    /// Per-shipment status changes.
    Shipments,
    /// Notification log appends.
    Notifications,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Shipments to include. Empty means all shipments; events about no
    /// particular shipment always pass.
    pub shipment_ids: Vec<ShipmentId>,
}

impl EventFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            shipment_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn shipments(shipment_ids: Vec<ShipmentId>) -> Self {
        Self {
            topics: Vec::new(),
            shipment_ids,
        }
    }

    #[must_use]
    pub fn matches(&self, event: &TrackingEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let shipment_match = self.shipment_ids.is_empty()
            || event
                .shipment_id()
                .map_or(true, |id| self.shipment_ids.contains(id));

        topic_match && shipment_match
    }
}
