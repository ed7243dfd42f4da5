//! Service Layer
//!
//! - `update_engine`: `UpdateEngine`, the `UpdateEngineApi` implementation
//! - `scheduler`: `TickScheduler`, the periodic driver

mod scheduler;
mod update_engine;

pub use scheduler::{SchedulerHandle, TickScheduler};
pub use update_engine::UpdateEngine;
