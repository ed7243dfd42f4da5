//! Notification Center
//!
//! Shared handle over a `NotificationLog`.

use parking_lot::RwLock;
use shared_types::{Timestamp, TransitionEvent};
use tracing::{debug, info};

use crate::domain::{Notification, NotificationDraft, NotificationId, NotificationLog};
use crate::error::NotificationError;

#[derive(Debug, Default)]
pub struct NotificationCenter {
    log: RwLock<NotificationLog>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: RwLock::new(NotificationLog::with_capacity(capacity)),
        }
    }

    pub fn add(&self, draft: NotificationDraft, now: Timestamp) -> Notification {
        let notification = self.log.write().push(draft, now);
        debug!(
            notification_id = %notification.id(),
            shipment_id = %notification.shipment_id(),
            kind = notification.kind().as_str(),
            "Notification added"
        );
        notification
    }

    /// Appends the entry for one engine transition, if its status notifies.
    pub fn from_transition(&self, event: &TransitionEvent, now: Timestamp) -> Option<Notification> {
        let draft = NotificationDraft::from_transition(event)?;
        Some(self.add(draft, now))
    }

    /// Appends entries for a tick's transitions in order, under one lock.
    ///
    /// Each entry is stamped with its event's timestamp.
    pub fn add_transitions(&self, events: &[TransitionEvent]) -> Vec<Notification> {
        let drafts: Vec<_> = events
            .iter()
            .filter_map(|event| {
                NotificationDraft::from_transition(event).map(|draft| (draft, event.timestamp))
            })
            .collect();
        if drafts.is_empty() {
            return Vec::new();
        }

        let mut log = self.log.write();
        let added: Vec<_> = drafts
            .into_iter()
            .map(|(draft, at)| log.push(draft, at))
            .collect();
        info!(count = added.len(), "Transition notifications added");
        added
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.log.read().get(id).cloned()
    }

    pub fn mark_read(&self, id: NotificationId) -> Result<(), NotificationError> {
        self.log.write().mark_read(id)
    }

    pub fn mark_unread(&self, id: NotificationId) -> Result<(), NotificationError> {
        self.log.write().mark_unread(id)
    }

    pub fn mark_all_read(&self) {
        self.log.write().mark_all_read();
    }

    pub fn delete(&self, id: NotificationId) -> Result<Notification, NotificationError> {
        self.log.write().delete(id)
    }

    pub fn clear(&self) {
        self.log.write().clear();
    }

    pub fn unread_count(&self) -> usize {
        self.log.read().unread_count()
    }

    pub fn len(&self) -> usize {
        self.log.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.read().is_empty()
    }

    pub fn recent(&self, n: usize) -> Vec<Notification> {
        self.log.read().recent(n)
    }

    /// Every entry, newest first.
    pub fn all(&self) -> Vec<Notification> {
        self.log.read().iter().cloned().collect()
    }
}
