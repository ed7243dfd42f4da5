//! # Tracker Runtime Library
//!
//! Exposes the runtime's wiring for tests. The entry point is the
//! `main.rs` binary.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing and register metrics (`st-telemetry`)
//! 2. Load `RuntimeConfig` from the environment
//! 3. Load the fleet file, or generate the demo fleet
//! 4. Wire store, notification log, event bus and engine
//! 5. Tick until Ctrl-C, then stop the scheduler before anything else

pub mod config;
pub mod error;
pub mod fleet;
pub mod runtime;

pub use config::{RuntimeConfig, DEFAULT_DEMO_FLEET_SIZE};
pub use error::RuntimeError;
pub use fleet::{demo_fleet, load_fleet};
pub use runtime::{tick_sample, TrackerRuntime};
