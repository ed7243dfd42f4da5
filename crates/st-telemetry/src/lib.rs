//! # Ship-Track Telemetry
//!
//! Structured logging and Prometheus metrics for the tracker runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use st_telemetry::{init_tracing, register_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! register_metrics()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ST_SERVICE_NAME` | `shiptrack` | Service name attached to the startup log |
//! | `ST_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `ST_JSON_LOGS` | `false` | JSON formatted logs |
//! | `ST_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_tick, register_metrics, set_active_shipments, TickSample,
    ACTIVE_SHIPMENTS, NOTIFICATIONS_EMITTED, REGISTRY, SHIPMENTS_ADVANCED, SHIPMENTS_SKIPPED,
    STALE_DELTAS, STATUS_TRANSITIONS, TICKS_TOTAL, TICK_DURATION,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
