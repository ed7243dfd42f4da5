//! Engine configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use st_04_update_engine::domain::EngineConfigBuilder;
//!
//! let config = EngineConfigBuilder::new()
//!     .tick_interval_ms(1_000)
//!     .progress_increment(0.02)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use st_01_geospatial::DistanceUnit;

use crate::error::EngineError;

/// Reference tick period.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5_000;
/// Progress added per tick; about 100 ticks per route regardless of length.
pub const DEFAULT_PROGRESS_INCREMENT: f64 = 0.01;
/// Progress at which an in-transit shipment goes out for delivery.
pub const DEFAULT_PROMOTION_THRESHOLD: f64 = 0.95;
/// Progress at which an out-for-delivery shipment is delivered.
pub const DEFAULT_DELIVERY_THRESHOLD: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_interval_ms: u64,
    pub progress_increment: f64,
    pub promotion_threshold: f64,
    pub delivery_threshold: f64,
    /// Unit for distances in engine logs. Progress is a ratio and unitless.
    pub distance_unit: DistanceUnit,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            progress_increment: DEFAULT_PROGRESS_INCREMENT,
            promotion_threshold: DEFAULT_PROMOTION_THRESHOLD,
            delivery_threshold: DEFAULT_DELIVERY_THRESHOLD,
            distance_unit: DistanceUnit::Miles,
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks ranges and threshold ordering.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tick_interval_ms == 0 {
            return Err(EngineError::invalid("tick_interval_ms", "must be positive"));
        }
        if !(self.progress_increment > 0.0 && self.progress_increment <= 1.0) {
            return Err(EngineError::invalid(
                "progress_increment",
                format!("{} not in (0, 1]", self.progress_increment),
            ));
        }
        if !(self.delivery_threshold > 0.0 && self.delivery_threshold <= 1.0) {
            return Err(EngineError::invalid(
                "delivery_threshold",
                format!("{} not in (0, 1]", self.delivery_threshold),
            ));
        }
        if !(self.promotion_threshold > 0.0 && self.promotion_threshold <= self.delivery_threshold)
        {
            return Err(EngineError::invalid(
                "promotion_threshold",
                format!(
                    "{} not in (0, {}]",
                    self.promotion_threshold, self.delivery_threshold
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for `EngineConfig`; unset fields take the defaults.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    tick_interval_ms: Option<u64>,
    progress_increment: Option<f64>,
    promotion_threshold: Option<f64>,
    delivery_threshold: Option<f64>,
    distance_unit: Option<DistanceUnit>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = Some(ms);
        self
    }

    pub fn progress_increment(mut self, increment: f64) -> Self {
        self.progress_increment = Some(increment);
        self
    }

    pub fn promotion_threshold(mut self, threshold: f64) -> Self {
        self.promotion_threshold = Some(threshold);
        self
    }

    pub fn delivery_threshold(mut self, threshold: f64) -> Self {
        self.delivery_threshold = Some(threshold);
        self
    }

    pub fn distance_unit(mut self, unit: DistanceUnit) -> Self {
        self.distance_unit = Some(unit);
        self
    }

    pub fn build(self) -> Result<EngineConfig, EngineError> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            tick_interval_ms: self.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
            progress_increment: self.progress_increment.unwrap_or(defaults.progress_increment),
            promotion_threshold: self
                .promotion_threshold
                .unwrap_or(defaults.promotion_threshold),
            delivery_threshold: self.delivery_threshold.unwrap_or(defaults.delivery_threshold),
            distance_unit: self.distance_unit.unwrap_or(defaults.distance_unit),
        };

        config.validate()?;
        Ok(config)
    }
}
