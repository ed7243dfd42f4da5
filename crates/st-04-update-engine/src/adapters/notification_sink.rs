//! `NotificationSink` implementations.

use std::sync::Arc;

use shared_bus::{EventPublisher, TrackingEvent};
use shared_types::{Timestamp, TransitionEvent};
use st_02_shipment_store::CommitOutcome;
use st_03_notifications::NotificationCenter;

use crate::ports::NotificationSink;

/// Appends transitions to the notification log.
pub struct NotificationCenterSink {
    center: Arc<NotificationCenter>,
}

impl NotificationCenterSink {
    pub fn new(center: Arc<NotificationCenter>) -> Self {
        Self { center }
    }
}

impl NotificationSink for NotificationCenterSink {
    fn emit(&self, events: Vec<TransitionEvent>) -> usize {
        self.center.add_transitions(&events).len()
    }
}

/// Appends transitions to the notification log and announces them, plus
/// every batch commit, on the event bus.
pub struct BusNotificationSink<P: EventPublisher> {
    center: Arc<NotificationCenter>,
    bus: Arc<P>,
}

impl<P: EventPublisher> BusNotificationSink<P> {
    pub fn new(center: Arc<NotificationCenter>, bus: Arc<P>) -> Self {
        Self { center, bus }
    }
}

impl<P: EventPublisher> NotificationSink for BusNotificationSink<P> {
    fn emit(&self, events: Vec<TransitionEvent>) -> usize {
        let added = self.center.add_transitions(&events);

        for event in events {
            self.bus.publish(TrackingEvent::StatusTransition(event));
        }
        for notification in &added {
            self.bus.publish(TrackingEvent::NotificationAdded {
                notification_id: notification.id().to_string(),
                shipment_id: notification.shipment_id().clone(),
                title: notification.title().to_string(),
                message: notification.message().to_string(),
                timestamp: notification.timestamp(),
            });
        }
        added.len()
    }

    fn batch_committed(&self, tick: u64, outcome: &CommitOutcome, now: Timestamp) {
        self.bus.publish(TrackingEvent::BatchCommitted {
            tick,
            applied: outcome.applied.len(),
            stale: outcome.stale.len(),
            timestamp: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
    use shared_types::{ShipmentId, ShipmentStatus};

    fn event(id: &str, status: ShipmentStatus) -> TransitionEvent {
        TransitionEvent {
            shipment_id: ShipmentId::new(id),
            status,
            tracking_number: format!("TRK-{id}"),
            destination_label: "Boise, ID".to_string(),
            timestamp: 10,
        }
    }

    #[test]
    fn test_center_sink_appends() {
        let center = Arc::new(NotificationCenter::new());
        let sink = NotificationCenterSink::new(Arc::clone(&center));

        let added = sink.emit(vec![
            event("a", ShipmentStatus::OutForDelivery),
            event("b", ShipmentStatus::Delivered),
        ]);
        assert_eq!(added, 2);
        assert_eq!(center.unread_count(), 2);
    }

    #[test]
    fn test_bus_sink_publishes() {
        let center = Arc::new(NotificationCenter::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let mut transitions = bus.subscribe(EventFilter::topics(vec![EventTopic::Shipments]));
        let mut notifications = bus.subscribe(EventFilter::topics(vec![EventTopic::Notifications]));
        let mut batches = bus.subscribe(EventFilter::topics(vec![EventTopic::Engine]));
        let sink = BusNotificationSink::new(Arc::clone(&center), Arc::clone(&bus));

        let outcome = CommitOutcome {
            applied: vec![ShipmentId::new("a")],
            ..CommitOutcome::default()
        };
        sink.batch_committed(4, &outcome, 10);
        assert_eq!(sink.emit(vec![event("a", ShipmentStatus::Delivered)]), 1);

        assert_eq!(transitions.drain().len(), 1);
        assert_eq!(notifications.drain().len(), 1);
        let batch = batches.drain();
        assert!(matches!(
            batch.as_slice(),
            [TrackingEvent::BatchCommitted { tick: 4, applied: 1, .. }]
        ));
        assert_eq!(center.len(), 1);
    }
}
