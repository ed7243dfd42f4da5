//! Error types for the notification log

use thiserror::Error;

use crate::domain::NotificationId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),
}
