//! # Ship-Track Runtime
//!
//! Runs the shipment motion simulation until interrupted.

use anyhow::{Context, Result};
use tracing::{debug, info};

use st_04_update_engine::{SystemTimeSource, TimeSource};
use st_runtime::{demo_fleet, load_fleet, RuntimeConfig, TrackerRuntime};
use st_telemetry::{encode_metrics, init_tracing, register_metrics, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_tracing(&telemetry).context("Failed to initialize tracing")?;
    register_metrics().context("Failed to register metrics")?;

    let config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;

    let shipments = match &config.fleet_file {
        Some(path) => load_fleet(path)?,
        None => {
            info!(shipments = config.demo_fleet_size, "No fleet file given, generating demo fleet");
            demo_fleet(config.demo_fleet_size, SystemTimeSource.now())
        }
    };
    let runtime = TrackerRuntime::new(config, shipments)?;

    info!("===========================================");
    info!("  Ship-Track Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let scheduler = runtime.start();
    info!("Tracker is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    scheduler.shutdown().await;
    runtime.shutdown();

    let summary = runtime.summary();
    info!(
        total = summary.total_shipments,
        delivered = summary.status_counts.delivered,
        in_transit = summary.status_counts.in_transit,
        out_for_delivery = summary.status_counts.out_for_delivery,
        on_time_rate = summary.on_time_rate,
        unread_notifications = runtime.notifications().unread_count(),
        ticks = runtime.engine().metrics().ticks,
        "Final fleet summary"
    );
    debug!(metrics = %encode_metrics()?, "Prometheus snapshot");

    info!("Shutdown complete");
    Ok(())
}
