//! Bounded newest-first notification list.

use std::collections::VecDeque;

use shared_types::Timestamp;

use super::notification::{Notification, NotificationDraft, NotificationId};
use crate::error::NotificationError;

/// Entries kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 50;

/// Entries returned by `recent` in the sidebar view.
pub const DEFAULT_RECENT: usize = 10;

#[derive(Debug, Clone)]
pub struct NotificationLog {
    // Front is newest.
    entries: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepends a new entry and evicts from the tail past capacity.
    pub fn push(&mut self, draft: NotificationDraft, now: Timestamp) -> Notification {
        let notification = Notification::from_draft(draft, now);
        self.entries.push_front(notification.clone());
        self.entries.truncate(self.capacity);
        notification
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id() == id)
    }

    fn find_mut(&mut self, id: NotificationId) -> Result<&mut Notification, NotificationError> {
        self.entries
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or(NotificationError::NotFound(id))
    }

    pub fn mark_read(&mut self, id: NotificationId) -> Result<(), NotificationError> {
        self.find_mut(id)?.read = true;
        Ok(())
    }

    pub fn mark_unread(&mut self, id: NotificationId) -> Result<(), NotificationError> {
        self.find_mut(id)?.read = false;
        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    pub fn delete(&mut self, id: NotificationId) -> Result<Notification, NotificationError> {
        let index = self
            .entries
            .iter()
            .position(|n| n.id() == id)
            .ok_or(NotificationError::NotFound(id))?;
        self.entries
            .remove(index)
            .ok_or(NotificationError::NotFound(id))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.is_read()).count()
    }

    /// Up to `n` newest entries.
    pub fn recent(&self, n: usize) -> Vec<Notification> {
        self.entries.iter().take(n).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> + '_ {
        self.entries.iter()
    }
}
