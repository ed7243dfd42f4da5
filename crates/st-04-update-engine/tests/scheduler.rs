//! # Scheduler Tests
//!
//! Run on a paused tokio clock so periods elapse deterministically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shared_types::{Location, Shipment, ShipmentId, ShipmentStatus};
use st_02_shipment_store::ShipmentStore;
use st_03_notifications::NotificationCenter;
use st_04_update_engine::{
    EngineConfig, NotificationCenterSink, StoreRepositoryAdapter, TickReport, TickScheduler,
    UpdateEngine, UpdateEngineApi,
};
use tokio::sync::mpsc;

// =============================================================================
// TEST HELPERS
// =============================================================================

#[derive(Default)]
struct CountingEngine {
    config: EngineConfig,
    ticks: AtomicU64,
}

impl UpdateEngineApi for CountingEngine {
    fn tick(&self) -> TickReport {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        TickReport::new(tick, 0)
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ticks_run(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

/// Yields enough times for the scheduler task to observe elapsed time.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_ticks_once_per_period() {
    let engine = Arc::new(CountingEngine::default());
    let handle = TickScheduler::spawn(Arc::clone(&engine), Duration::from_secs(5));

    settle().await;
    assert_eq!(engine.ticks_run(), 0, "first tick waits one full period");

    tokio::time::sleep(Duration::from_millis(5_001)).await;
    settle().await;
    assert_eq!(engine.ticks_run(), 1);

    tokio::time::sleep(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(engine.ticks_run(), 3);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn test_no_tick_after_stop() {
    let engine = Arc::new(CountingEngine::default());
    let handle = TickScheduler::spawn(Arc::clone(&engine), Duration::from_millis(100));

    tokio::time::sleep(Duration::from_millis(350)).await;
    settle().await;
    let before = engine.ticks_run();
    assert_eq!(before, 3);

    handle.stop();
    tokio::time::sleep(Duration::from_secs(5)).await;
    settle().await;

    assert_eq!(engine.ticks_run(), before);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_graceful_shutdown_and_drop() {
    let engine = Arc::new(CountingEngine::default());
    let handle = TickScheduler::spawn(Arc::clone(&engine), Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(120)).await;
    handle.shutdown().await;
    let after_shutdown = engine.ticks_run();

    let dropped = TickScheduler::spawn(Arc::clone(&engine), Duration::from_millis(50));
    drop(dropped);
    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;

    assert_eq!(engine.ticks_run(), after_shutdown);
}

#[tokio::test(start_paused = true)]
async fn test_reports_reach_callback() {
    let store = Arc::new(ShipmentStore::with_shipments(vec![Shipment::new(
        "a",
        "1ZA",
        ShipmentStatus::InTransit,
        Location::new(0.0, 0.0, "Dock", "Origin", "OR", "10000"),
        Location::new(0.0, 10.0, "End", "Terminus", "TM", "20000"),
        0,
    )]));
    let engine = Arc::new(
        UpdateEngine::new(
            EngineConfig::default(),
            Arc::new(StoreRepositoryAdapter::new(Arc::clone(&store))),
            Arc::new(NotificationCenterSink::new(Arc::new(NotificationCenter::new()))),
        )
        .expect("valid config"),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = TickScheduler::spawn_with(engine, Duration::from_secs(5), move |report| {
        let _ = tx.send(report);
    });

    let first = rx.recv().await.expect("first report");
    let second = rx.recv().await.expect("second report");
    handle.stop();

    assert_eq!(first.tick, 1);
    assert_eq!(second.tick, 2);
    assert_eq!(second.committed, 1);
    let s = store.get(&ShipmentId::new("a")).expect("present");
    assert!((s.current_location.lng - 0.2).abs() < 1e-9);
}
