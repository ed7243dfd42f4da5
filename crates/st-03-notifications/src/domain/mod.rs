//! # Domain Layer - Notifications
//!
//! - `notification`: the entry types and transition-to-entry mapping
//! - `log`: the bounded newest-first list

pub mod log;
pub mod notification;

pub use log::{NotificationLog, DEFAULT_CAPACITY, DEFAULT_RECENT};
pub use notification::{Notification, NotificationDraft, NotificationId, NotificationKind};
