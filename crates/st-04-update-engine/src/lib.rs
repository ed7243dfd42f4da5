//! # ST-04 Update Engine
//!
//! The shipment motion simulation. Every tick advances each active shipment
//! a fixed fraction of its route, promotes its status at the thresholds,
//! relabels its position with the nearest reference city, commits all
//! changes to the store as one batch and emits one notification per status
//! transition.
//!
//! ## Tick Flow
//!
//! ```text
//! TickScheduler ──tick()──→ UpdateEngine
//!                              │ 1. snapshot()            ShipmentRepository
//!                              │ 2-7. advance() per active shipment (pure)
//!                              │ 8a. commit_batch(deltas) ShipmentRepository
//!                              └ 8b. emit(transitions)    NotificationSink
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Only `InTransit`/`OutForDelivery` shipments move | `service/update_engine.rs` - selection |
//! | INVARIANT-2 | At most one transition per shipment per tick | `domain/motion.rs` - `next_status()` |
//! | INVARIANT-3 | Delivered location equals destination exactly | `domain/motion.rs` - `advance()` |
//! | INVARIANT-4 | Deltas reach the store in one commit | `service/update_engine.rs` - step 8 |
//! | INVARIANT-5 | Notifications follow the commit, never precede it | `service/update_engine.rs` - step 8 |
//! | INVARIANT-6 | No tick fires after `stop()` | `service/scheduler.rs` - watch + abort |
//!
//! ## Failure Semantics
//!
//! A tick never fails. Shipments with out-of-range coordinates are skipped
//! and logged; ids that vanished before the commit are dropped. Both show up
//! in the returned `TickReport`.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{BusNotificationSink, NotificationCenterSink, StoreRepositoryAdapter};
pub use domain::{
    advance, next_status, Advance, EngineConfig, EngineConfigBuilder, SkipReason,
    SkippedShipment, TickReport, THRESHOLD_TOLERANCE,
};
pub use error::EngineError;
pub use metrics::{EngineMetrics, EngineMetricsSnapshot};
pub use ports::{
    CityGazetteer, MockTimeSource, NotificationSink, ShipmentRepository, SystemTimeSource,
    TimeSource, UpdateEngineApi,
};
pub use service::{SchedulerHandle, TickScheduler, UpdateEngine};
