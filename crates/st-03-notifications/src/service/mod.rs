//! Notification Center Service

mod notification_center;

pub use notification_center::NotificationCenter;
