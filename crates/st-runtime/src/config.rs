//! # Runtime Configuration
//!
//! Engine tuning and fleet source, read from the environment. Logging
//! settings live in `st_telemetry::TelemetryConfig`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use st_03_notifications::DEFAULT_CAPACITY;
use st_04_update_engine::EngineConfig;

use crate::error::RuntimeError;

/// Shipments generated when no fleet file is given.
pub const DEFAULT_DEMO_FLEET_SIZE: usize = 50;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Validated engine configuration.
    pub engine: EngineConfig,
    /// JSON array of shipments to load at startup.
    pub fleet_file: Option<PathBuf>,
    /// Size of the generated fleet when `fleet_file` is unset.
    pub demo_fleet_size: usize,
    /// Notification log capacity.
    pub notification_capacity: usize,
    /// Event bus buffer per subscriber.
    pub bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            fleet_file: None,
            demo_fleet_size: DEFAULT_DEMO_FLEET_SIZE,
            notification_capacity: DEFAULT_CAPACITY,
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// - `ST_TICK_INTERVAL_MS`: tick period (default: 5000)
    /// - `ST_PROGRESS_INCREMENT`: route fraction per tick (default: 0.01)
    /// - `ST_PROMOTION_THRESHOLD`: out-for-delivery threshold (default: 0.95)
    /// - `ST_FLEET_FILE`: JSON array of shipments (default: generated fleet)
    /// - `ST_DEMO_FLEET_SIZE`: generated fleet size (default: 50)
    /// - `ST_NOTIFICATION_CAPACITY`: notification log size (default: 50)
    /// - `ST_BUS_CAPACITY`: event bus buffer (default: 1000)
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut engine = EngineConfig::builder();
        if let Some(ms) = parse_var::<u64>(&lookup, "ST_TICK_INTERVAL_MS")? {
            engine = engine.tick_interval_ms(ms);
        }
        if let Some(increment) = parse_var::<f64>(&lookup, "ST_PROGRESS_INCREMENT")? {
            engine = engine.progress_increment(increment);
        }
        if let Some(threshold) = parse_var::<f64>(&lookup, "ST_PROMOTION_THRESHOLD")? {
            engine = engine.promotion_threshold(threshold);
        }

        let defaults = Self::default();
        Ok(Self {
            engine: engine.build()?,
            fleet_file: lookup("ST_FLEET_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            demo_fleet_size: parse_var(&lookup, "ST_DEMO_FLEET_SIZE")?
                .unwrap_or(defaults.demo_fleet_size),
            notification_capacity: parse_var(&lookup, "ST_NOTIFICATION_CAPACITY")?
                .unwrap_or(defaults.notification_capacity),
            bus_capacity: parse_var(&lookup, "ST_BUS_CAPACITY")?
                .unwrap_or(defaults.bus_capacity),
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, RuntimeError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeError::InvalidVariable { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use st_04_update_engine::EngineError;

    fn config(pairs: &[(&str, &str)]) -> Result<RuntimeConfig, RuntimeError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).expect("defaults are valid");
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.engine.tick_interval_ms, 5_000);
        assert_eq!(config.demo_fleet_size, 50);
        assert!(config.fleet_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("ST_TICK_INTERVAL_MS", "250"),
            ("ST_PROGRESS_INCREMENT", "0.05"),
            ("ST_PROMOTION_THRESHOLD", " 0.9 "),
            ("ST_FLEET_FILE", "/tmp/fleet.json"),
            ("ST_DEMO_FLEET_SIZE", "5"),
        ])
        .expect("valid overrides");

        assert_eq!(config.engine.tick_interval_ms, 250);
        assert_eq!(config.engine.progress_increment, 0.05);
        assert_eq!(config.engine.promotion_threshold, 0.9);
        assert_eq!(config.fleet_file, Some(PathBuf::from("/tmp/fleet.json")));
        assert_eq!(config.demo_fleet_size, 5);
    }

    #[test]
    fn test_unparsable_value() {
        let err = config(&[("ST_TICK_INTERVAL_MS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidVariable { name: "ST_TICK_INTERVAL_MS", .. }
        ));
    }

    #[test]
    fn test_engine_validation_applies() {
        let err = config(&[("ST_PROMOTION_THRESHOLD", "1.5")]).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Engine(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_blank_fleet_file_ignored() {
        let config = config(&[("ST_FLEET_FILE", "  ")]).expect("valid");
        assert!(config.fleet_file.is_none());
    }
}
