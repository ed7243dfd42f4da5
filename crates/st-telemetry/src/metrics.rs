//! Prometheus metrics for the tracker runtime.
//!
//! All metrics follow the naming convention: `st_<component>_<metric>_<unit>`

use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ENGINE METRICS
    // =========================================================================

    pub static ref TICKS_TOTAL: Counter = Counter::new(
        "st_engine_ticks_total",
        "Total update engine ticks"
    ).expect("metric creation failed");

    /// Shipments whose delta was committed
    pub static ref SHIPMENTS_ADVANCED: Counter = Counter::new(
        "st_engine_shipments_advanced_total",
        "Total shipment advances committed to the store"
    ).expect("metric creation failed");

    pub static ref STATUS_TRANSITIONS: Counter = Counter::new(
        "st_engine_status_transitions_total",
        "Total status transitions fired by the engine"
    ).expect("metric creation failed");

    pub static ref SHIPMENTS_SKIPPED: CounterVec = CounterVec::new(
        Opts::new("st_engine_shipments_skipped_total", "Shipments skipped during a tick"),
        &["reason"]  // reason: invalid_coordinate/stale_reference/already_delivered/superseded
    ).expect("metric creation failed");

    /// Deltas dropped because their shipment vanished before commit
    pub static ref STALE_DELTAS: Counter = Counter::new(
        "st_store_stale_deltas_total",
        "Deltas dropped at commit for unknown shipment ids"
    ).expect("metric creation failed");

    pub static ref TICK_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "st_engine_tick_duration_seconds",
            "Time spent in one engine tick"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0])
    ).expect("metric creation failed");

    // =========================================================================
    // FLEET METRICS
    // =========================================================================

    /// Shipments currently in transit or out for delivery
    pub static ref ACTIVE_SHIPMENTS: Gauge = Gauge::new(
        "st_fleet_active_shipments",
        "Number of shipments the engine is moving"
    ).expect("metric creation failed");

    pub static ref NOTIFICATIONS_EMITTED: Counter = Counter::new(
        "st_notifications_emitted_total",
        "Total notifications appended to the log"
    ).expect("metric creation failed");
}

/// Per-tick figures fed to the Prometheus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSample {
    pub advanced: usize,
    pub transitions: usize,
    /// `(reason label, count)` pairs
    pub skipped: Vec<(&'static str, usize)>,
    pub stale: usize,
    pub notifications: usize,
    pub duration: Duration,
}

/// Register all metrics with the global registry. Calling it again is a no-op.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Engine
        Box::new(TICKS_TOTAL.clone()),
        Box::new(SHIPMENTS_ADVANCED.clone()),
        Box::new(STATUS_TRANSITIONS.clone()),
        Box::new(SHIPMENTS_SKIPPED.clone()),
        Box::new(STALE_DELTAS.clone()),
        Box::new(TICK_DURATION.clone()),
        // Fleet
        Box::new(ACTIVE_SHIPMENTS.clone()),
        Box::new(NOTIFICATIONS_EMITTED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

pub fn record_tick(sample: &TickSample) {
    TICKS_TOTAL.inc();
    SHIPMENTS_ADVANCED.inc_by(sample.advanced as f64);
    STATUS_TRANSITIONS.inc_by(sample.transitions as f64);
    STALE_DELTAS.inc_by(sample.stale as f64);
    NOTIFICATIONS_EMITTED.inc_by(sample.notifications as f64);
    for (reason, count) in &sample.skipped {
        if *count > 0 {
            SHIPMENTS_SKIPPED
                .with_label_values(&[*reason])
                .inc_by(*count as f64);
        }
    }
    TICK_DURATION.observe(sample.duration.as_secs_f64());
}

pub fn set_active_shipments(count: usize) {
    ACTIVE_SHIPMENTS.set(count as f64);
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_twice() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_record_tick_increments() {
        let ticks = TICKS_TOTAL.get();
        let advanced = SHIPMENTS_ADVANCED.get();
        let invalid = SHIPMENTS_SKIPPED
            .with_label_values(&["invalid_coordinate"])
            .get();

        record_tick(&TickSample {
            advanced: 3,
            transitions: 1,
            skipped: vec![("invalid_coordinate", 2), ("stale_reference", 0)],
            duration: Duration::from_millis(2),
            ..TickSample::default()
        });

        assert!(TICKS_TOTAL.get() >= ticks + 1.0);
        assert!(SHIPMENTS_ADVANCED.get() >= advanced + 3.0);
        assert!(
            SHIPMENTS_SKIPPED
                .with_label_values(&["invalid_coordinate"])
                .get()
                >= invalid + 2.0
        );
    }

    #[test]
    fn test_gauge_set() {
        set_active_shipments(42);
        assert_eq!(ACTIVE_SHIPMENTS.get(), 42.0);
    }

    #[test]
    fn test_encode_contains_registered_metrics() {
        register_metrics().expect("registration");
        TICKS_TOTAL.inc();

        let text = encode_metrics().expect("encoding");
        assert!(text.contains("st_engine_ticks_total"));
        assert!(text.contains("st_fleet_active_shipments"));
    }
}
