//! # Tracker Runtime
//!
//! Composition root. Owns every shared handle and is the only place that
//! knows which adapter backs which port.
//!
//! ```text
//! TickScheduler ──→ UpdateEngine ──commit──→ ShipmentStore
//!                        │
//!                        └──emit──→ BusNotificationSink ──→ NotificationCenter
//!                                           │
//!                                           └──publish──→ InMemoryEventBus ──→ notification logger
//! ```

use std::sync::Arc;
use std::time::Duration;

use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, TrackingEvent};
use shared_types::{Shipment, Timestamp};
use st_02_shipment_store::ShipmentStore;
use st_03_notifications::NotificationCenter;
use st_04_update_engine::{
    BusNotificationSink, SchedulerHandle, SkipReason, StoreRepositoryAdapter, SystemTimeSource,
    TickReport, TickScheduler, TimeSource, UpdateEngine,
};
use st_05_fleet_queries::AnalyticsSummary;
use st_telemetry::TickSample;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

pub struct TrackerRuntime {
    config: RuntimeConfig,
    store: Arc<ShipmentStore>,
    notifications: Arc<NotificationCenter>,
    bus: Arc<InMemoryEventBus>,
    engine: Arc<UpdateEngine>,
    clock: Arc<dyn TimeSource>,
    shutdown_tx: watch::Sender<bool>,
}

impl TrackerRuntime {
    /// Wires a runtime on the system clock.
    pub fn new(config: RuntimeConfig, shipments: Vec<Shipment>) -> Result<Self, RuntimeError> {
        Self::with_clock(config, shipments, Arc::new(SystemTimeSource))
    }

    /// Wires a runtime on `clock`, loading `shipments` into a fresh store.
    pub fn with_clock(
        config: RuntimeConfig,
        shipments: Vec<Shipment>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, RuntimeError> {
        let store = Arc::new(ShipmentStore::new());
        store.load_shipments(shipments, clock.now());

        let notifications = Arc::new(NotificationCenter::with_capacity(
            config.notification_capacity,
        ));
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));

        let engine = UpdateEngine::new(
            config.engine.clone(),
            Arc::new(StoreRepositoryAdapter::new(Arc::clone(&store))),
            Arc::new(BusNotificationSink::new(
                Arc::clone(&notifications),
                Arc::clone(&bus),
            )),
        )?
        .with_time_source(Arc::clone(&clock));

        let (shutdown_tx, _) = watch::channel(false);

        info!(
            shipments = store.len(),
            tick_interval_ms = config.engine.tick_interval_ms,
            progress_increment = config.engine.progress_increment,
            "Tracker runtime created"
        );

        Ok(Self {
            config,
            store,
            notifications,
            bus,
            engine: Arc::new(engine),
            clock,
            shutdown_tx,
        })
    }

    /// Starts the notification logger and the tick scheduler.
    ///
    /// Every tick report is exported to the Prometheus counters.
    pub fn start(&self) -> SchedulerHandle {
        self.spawn_notification_logger();

        let store = Arc::clone(&self.store);
        let engine = Arc::clone(&self.engine);
        let mut last_tick_ns = engine.metrics().tick_time_ns;

        TickScheduler::spawn_with(
            Arc::clone(&self.engine),
            self.config.engine.tick_interval(),
            move |report| {
                let tick_ns = engine.metrics().tick_time_ns;
                let elapsed = Duration::from_nanos(tick_ns.saturating_sub(last_tick_ns));
                last_tick_ns = tick_ns;

                st_telemetry::record_tick(&tick_sample(&report, elapsed));
                st_telemetry::set_active_shipments(
                    store.read(|table| table.iter().filter(|s| s.is_active()).count()),
                );
            },
        )
    }

    /// Logs every notification published on the bus until shutdown.
    fn spawn_notification_logger(&self) {
        let mut subscription = self
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Notifications]));
        let mut shutdown = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.changed() => {
                        debug!("Notification logger received shutdown signal");
                        break;
                    }
                    event = subscription.recv() => match event {
                        Some(TrackingEvent::NotificationAdded { shipment_id, title, message, .. }) => {
                            info!(shipment = %shipment_id, %title, "{message}");
                        }
                        Some(_) => {}
                        None => break,
                    },
                }
            }
        });
    }

    /// Signals background tasks to stop. Stop the scheduler first.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        let _ = self.shutdown_tx.send(true);
    }

    pub fn summary(&self) -> AnalyticsSummary {
        let now = self.clock.now();
        self.store.read(|table| AnalyticsSummary::compute(table, now))
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<ShipmentStore> {
        Arc::clone(&self.store)
    }

    pub fn notifications(&self) -> Arc<NotificationCenter> {
        Arc::clone(&self.notifications)
    }

    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    pub fn engine(&self) -> Arc<UpdateEngine> {
        Arc::clone(&self.engine)
    }
}

/// Maps a tick report onto the Prometheus sample.
pub fn tick_sample(report: &TickReport, duration: Duration) -> TickSample {
    TickSample {
        advanced: report.committed,
        transitions: report.transitions,
        skipped: SkipReason::ALL
            .iter()
            .map(|reason| (reason.as_str(), report.skipped_for(*reason)))
            .collect(),
        stale: report.stale,
        notifications: report.notifications,
        duration,
    }
}
