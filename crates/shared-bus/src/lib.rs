//! # Shared Bus - Tracking Event Broadcast
//!
//! Carries what the simulation core did to UI-side subscribers. The core
//! never waits on a subscriber: publishing is synchronous and a bus with no
//! receivers simply drops the event.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Update Engine│                    │  Dashboard   │
//! │ Notif. Sink  │    publish()       │  (external)  │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, TrackingEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
