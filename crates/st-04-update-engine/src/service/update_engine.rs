//! Update Engine Service
//!
//! Orchestrates one tick: snapshot the table, compute every delta with the
//! pure motion step, commit them in one batch, then hand transitions to the
//! notification sink.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use shared_types::ShipmentId;
use st_01_geospatial::{calculate_distance, StaticGazetteer};
use tracing::{debug, info, warn};

use crate::domain::{advance, EngineConfig, SkipReason, SkippedShipment, TickReport};
use crate::error::EngineError;
use crate::metrics::{EngineMetrics, EngineMetricsSnapshot};
use crate::ports::{
    CityGazetteer, NotificationSink, ShipmentRepository, SystemTimeSource, TimeSource,
    UpdateEngineApi,
};

/// Update engine implementation
///
/// Holds no shipment state between ticks; everything is re-derived from
/// the repository snapshot.
pub struct UpdateEngine {
    config: EngineConfig,
    repository: Arc<dyn ShipmentRepository>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn TimeSource>,
    gazetteer: Arc<dyn CityGazetteer>,
    ticks: AtomicU64,
    metrics: EngineMetrics,
}

impl UpdateEngine {
    /// Creates an engine on the system clock and the built-in city list.
    pub fn new(
        config: EngineConfig,
        repository: Arc<dyn ShipmentRepository>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            repository,
            sink,
            clock: Arc::new(SystemTimeSource),
            gazetteer: Arc::new(StaticGazetteer::default()),
            ticks: AtomicU64::new(0),
            metrics: EngineMetrics::new(),
        })
    }

    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_gazetteer(mut self, gazetteer: Arc<dyn CityGazetteer>) -> Self {
        self.gazetteer = gazetteer;
        self
    }

    pub fn metrics(&self) -> EngineMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Remaining straight-line distance for a shipment, in the configured unit.
    pub fn remaining_distance(&self, id: &ShipmentId) -> Option<f64> {
        self.repository.get(id).map(|s| {
            calculate_distance(&s.current_location, &s.destination, self.config.distance_unit)
        })
    }
}

impl UpdateEngineApi for UpdateEngine {
    fn tick(&self) -> TickReport {
        let started = Instant::now();
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        let now = self.clock.now();
        let mut report = TickReport::new(tick, now);

        // 1. Select
        let snapshot = self.repository.snapshot();
        let mut deltas = Vec::new();
        let mut events = Vec::new();

        // 2-7. Advance each active shipment
        for shipment in snapshot.iter().filter(|s| s.status.is_active()) {
            report.selected += 1;
            match advance(shipment, &self.config, self.gazetteer.as_ref(), now) {
                Ok(step) => {
                    if let Some(event) = step.transition {
                        debug!(
                            shipment_id = %shipment.id,
                            from = %shipment.status,
                            to = %event.status,
                            progress = step.progress_after,
                            "Status transition"
                        );
                        events.push(event);
                    }
                    deltas.push(step.delta);
                }
                Err(e) => {
                    warn!(
                        shipment_id = %shipment.id,
                        error = %e,
                        "Skipping shipment with invalid coordinates"
                    );
                    report.skipped.push(SkippedShipment {
                        id: shipment.id.clone(),
                        reason: SkipReason::InvalidCoordinate,
                    });
                }
            }
        }
        report.advanced = deltas.len();

        // 8. Commit, then notify
        if !deltas.is_empty() {
            let outcome = self.repository.commit_batch(deltas, now);
            report.committed = outcome.applied.len();
            report.stale = outcome.stale.len();

            let dropped: HashSet<&ShipmentId> = outcome
                .stale
                .iter()
                .chain(&outcome.refused)
                .chain(&outcome.superseded)
                .collect();
            if !dropped.is_empty() {
                events.retain(|e| !dropped.contains(&e.shipment_id));
            }
            report.skipped.extend(outcome.stale.iter().map(|id| SkippedShipment {
                id: id.clone(),
                reason: SkipReason::StaleReference,
            }));
            report.skipped.extend(outcome.refused.iter().map(|id| SkippedShipment {
                id: id.clone(),
                reason: SkipReason::AlreadyDelivered,
            }));
            report.skipped.extend(outcome.superseded.iter().map(|id| SkippedShipment {
                id: id.clone(),
                reason: SkipReason::Superseded,
            }));

            self.sink.batch_committed(tick, &outcome, now);
        }

        report.transitions = events.len();
        if !events.is_empty() {
            report.notifications = self.sink.emit(events);
        }

        self.metrics.record_tick(&report, started.elapsed());
        if report.transitions > 0 || !report.skipped.is_empty() {
            info!(
                tick,
                selected = report.selected,
                committed = report.committed,
                transitions = report.transitions,
                skipped = report.skipped.len(),
                "Tick complete"
            );
        } else {
            debug!(
                tick,
                selected = report.selected,
                committed = report.committed,
                "Tick complete"
            );
        }
        report
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ticks_run(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StoreRepositoryAdapter;
    use crate::ports::MockTimeSource;
    use parking_lot::Mutex;
    use shared_types::{Location, Shipment, ShipmentStatus, Timestamp, TransitionEvent};
    use st_02_shipment_store::{CommitOutcome, ShipmentStore};

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<TransitionEvent>>,
        commits: Mutex<Vec<u64>>,
    }

    impl NotificationSink for RecordingSink {
        fn emit(&self, events: Vec<TransitionEvent>) -> usize {
            let n = events.len();
            self.events.lock().extend(events);
            n
        }

        fn batch_committed(&self, tick: u64, _outcome: &CommitOutcome, _now: Timestamp) {
            self.commits.lock().push(tick);
        }
    }

    fn route(id: &str, status: ShipmentStatus, progress: f64) -> Shipment {
        Shipment::new(
            id,
            format!("TRK-{id}"),
            status,
            Location::new(0.0, 0.0, "Dock", "Origin", "OR", "11111"),
            Location::new(0.0, 10.0, "1 End Rd", "Dest", "DS", "99999"),
            0,
        )
        .with_current_location(Location::at(0.0, 10.0 * progress))
    }

    fn engine(
        shipments: Vec<Shipment>,
    ) -> (UpdateEngine, Arc<ShipmentStore>, Arc<RecordingSink>) {
        let store = Arc::new(ShipmentStore::with_shipments(shipments));
        let sink = Arc::new(RecordingSink::default());
        let engine = UpdateEngine::new(
            EngineConfig::default(),
            Arc::new(StoreRepositoryAdapter::new(Arc::clone(&store))),
            sink.clone(),
        )
        .unwrap()
        .with_time_source(Arc::new(MockTimeSource::new(1_000)));
        (engine, store, sink)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let store = Arc::new(ShipmentStore::new());
        let config = EngineConfig {
            progress_increment: 0.0,
            ..EngineConfig::default()
        };
        let result = UpdateEngine::new(
            config,
            Arc::new(StoreRepositoryAdapter::new(store)),
            Arc::new(RecordingSink::default()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_inactive_shipments_untouched() {
        let (engine, store, sink) = engine(vec![
            route("p", ShipmentStatus::Pending, 0.0),
            route("d", ShipmentStatus::Delayed, 0.5),
            route("x", ShipmentStatus::Delivered, 1.0),
        ]);
        let before = store.snapshot();

        let report = engine.tick();

        assert!(report.is_idle());
        assert_eq!(report.committed, 0);
        assert_eq!(store.snapshot(), before);
        assert!(sink.commits.lock().is_empty());
    }

    #[test]
    fn test_invalid_coordinates_skipped_rest_advance() {
        let mut broken = route("bad", ShipmentStatus::InTransit, 0.1);
        broken.origin.lng = 500.0;
        let (engine, store, _sink) = engine(vec![broken.clone(), route("ok", ShipmentStatus::InTransit, 0.1)]);

        let report = engine.tick();

        assert_eq!(report.selected, 2);
        assert_eq!(report.committed, 1);
        assert_eq!(report.skipped_for(SkipReason::InvalidCoordinate), 1);
        assert_eq!(store.get(&ShipmentId::new("bad")).unwrap(), broken);
        assert_eq!(store.get(&ShipmentId::new("ok")).unwrap().updated_at, 1_000);
    }

    #[test]
    fn test_transition_emitted_after_commit() {
        let (engine, store, sink) = engine(vec![route("a", ShipmentStatus::InTransit, 0.94)]);

        let report = engine.tick();

        assert_eq!(report.transitions, 1);
        assert_eq!(report.notifications, 1);
        assert_eq!(*sink.commits.lock(), vec![1]);
        let events = sink.events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, ShipmentStatus::OutForDelivery);
        assert_eq!(
            store.get(&ShipmentId::new("a")).unwrap().status,
            ShipmentStatus::OutForDelivery
        );
    }

    #[test]
    fn test_tick_counter_and_metrics() {
        let (engine, _store, _sink) = engine(vec![route("a", ShipmentStatus::InTransit, 0.0)]);
        engine.tick();
        engine.tick();

        assert_eq!(engine.ticks_run(), 2);
        let metrics = engine.metrics();
        assert_eq!(metrics.ticks, 2);
        assert_eq!(metrics.shipments_advanced, 2);
        assert_eq!(metrics.transitions, 0);
    }

    #[test]
    fn test_remaining_distance() {
        let (engine, _store, _sink) = engine(vec![route("a", ShipmentStatus::InTransit, 0.5)]);
        let miles = engine.remaining_distance(&ShipmentId::new("a")).unwrap();
        // Five degrees of longitude on the equator
        assert!((miles - 345.5).abs() < 1.0);
        assert!(engine.remaining_distance(&ShipmentId::new("zz")).is_none());
    }
}
