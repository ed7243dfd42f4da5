//! # Domain Layer - Update Engine
//!
//! - `config`: `EngineConfig` and its builder
//! - `motion`: the pure per-shipment step
//! - `report`: `TickReport` and skip reasons

pub mod config;
pub mod motion;
pub mod report;

pub use config::{
    EngineConfig, EngineConfigBuilder, DEFAULT_DELIVERY_THRESHOLD, DEFAULT_PROGRESS_INCREMENT,
    DEFAULT_PROMOTION_THRESHOLD, DEFAULT_TICK_INTERVAL_MS,
};
pub use motion::{advance, next_status, reaches, Advance, THRESHOLD_TOLERANCE};
pub use report::{SkipReason, SkippedShipment, TickReport};
