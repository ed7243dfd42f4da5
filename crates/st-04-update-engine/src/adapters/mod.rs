//! Adapters Layer
//!
//! Binds the engine's outbound ports to the store, the notification log and
//! the event bus.

mod notification_sink;
mod store_repository;

pub use notification_sink::{BusNotificationSink, NotificationCenterSink};
pub use store_repository::StoreRepositoryAdapter;
