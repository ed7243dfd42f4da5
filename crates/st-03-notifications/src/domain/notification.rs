//! Notification entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{ShipmentId, ShipmentStatus, Timestamp, TransitionEvent};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for NotificationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Delay,
    OutForDelivery,
    Delivered,
    Exception,
}

impl NotificationKind {
    /// The kind raised when a shipment enters `status`, if any.
    pub fn for_status(status: ShipmentStatus) -> Option<Self> {
        match status {
            ShipmentStatus::OutForDelivery => Some(Self::OutForDelivery),
            ShipmentStatus::Delivered => Some(Self::Delivered),
            ShipmentStatus::Delayed => Some(Self::Delay),
            ShipmentStatus::Pending | ShipmentStatus::InTransit => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delay => "delay",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Exception => "exception",
        }
    }
}

/// Caller-supplied fields of a new notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub shipment_id: ShipmentId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Defaults to the time the draft is added.
    pub timestamp: Option<Timestamp>,
}

impl NotificationDraft {
    /// Builds the draft for an engine transition.
    ///
    /// Returns `None` for statuses that never notify.
    pub fn from_transition(event: &TransitionEvent) -> Option<Self> {
        let kind = NotificationKind::for_status(event.status)?;
        let message = match kind {
            NotificationKind::OutForDelivery => format!(
                "Shipment {} is out for delivery to {}",
                event.tracking_number, event.destination_label
            ),
            NotificationKind::Delivered => format!(
                "Shipment {} has been delivered to {}",
                event.tracking_number, event.destination_label
            ),
            NotificationKind::Delay | NotificationKind::Exception => format!(
                "Shipment {} is {}",
                event.tracking_number,
                event.status.label().to_lowercase()
            ),
        };
        Some(Self {
            shipment_id: event.shipment_id.clone(),
            kind,
            title: event.status.label().to_string(),
            message,
            timestamp: Some(event.timestamp),
        })
    }
}

/// One entry in the log. Only `read` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    shipment_id: ShipmentId,
    kind: NotificationKind,
    title: String,
    message: String,
    timestamp: Timestamp,
    pub(crate) read: bool,
}

impl Notification {
    pub(crate) fn from_draft(draft: NotificationDraft, now: Timestamp) -> Self {
        Self {
            id: NotificationId::generate(),
            shipment_id: draft.shipment_id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            timestamp: draft.timestamp.unwrap_or(now),
            read: false,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn shipment_id(&self) -> &ShipmentId {
        &self.shipment_id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn is_read(&self) -> bool {
        self.read
    }
}
