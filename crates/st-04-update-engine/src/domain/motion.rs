//! Per-shipment motion step
//!
//! Pure computation of one shipment's next state. Progress is re-derived
//! from the stored location every time, so the step depends on nothing but
//! the record itself.
//!
//! ```text
//!              +increment          ≥ promotion            ≥ delivery
//! InTransit ──────────────→ InTransit ──────→ OutForDelivery ──────→ Delivered
//! ```
//!
//! Thresholds are checked against the status held *before* the step, so one
//! step fires at most one transition.

use shared_types::{
    DeltaBase, Location, Shipment, ShipmentDelta, ShipmentStatus, StatusHistoryEntry, Timestamp,
    TransitionEvent, IN_TRANSIT_ADDRESS,
};
use st_01_geospatial::{interpolate_position, try_calculate_progress, CityGazetteer, GeoError};

use super::config::EngineConfig;

/// Slack on threshold comparisons; absorbs the residue of the
/// distance-ratio round trip so 0.94 + 0.01 counts as 0.95.
pub const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// The computed next state of one shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub delta: ShipmentDelta,
    pub transition: Option<TransitionEvent>,
    pub progress_before: f64,
    pub progress_after: f64,
}

pub fn reaches(progress: f64, threshold: f64) -> bool {
    progress + THRESHOLD_TOLERANCE >= threshold
}

/// Status after a step ending at `progress`, judged against the pre-step
/// status. Inactive statuses never move.
pub fn next_status(status: ShipmentStatus, progress: f64, config: &EngineConfig) -> ShipmentStatus {
    match status {
        ShipmentStatus::InTransit if reaches(progress, config.promotion_threshold) => {
            ShipmentStatus::OutForDelivery
        }
        ShipmentStatus::OutForDelivery if reaches(progress, config.delivery_threshold) => {
            ShipmentStatus::Delivered
        }
        other => other,
    }
}

/// Computes one step for an active shipment.
///
/// Fails only when a stored coordinate is out of range; the record is then
/// left alone for this tick.
pub fn advance(
    shipment: &Shipment,
    config: &EngineConfig,
    gazetteer: &dyn CityGazetteer,
    now: Timestamp,
) -> Result<Advance, GeoError> {
    let progress_before = try_calculate_progress(
        &shipment.origin,
        &shipment.current_location,
        &shipment.destination,
    )?;
    let mut progress_after = (progress_before + config.progress_increment).min(1.0);
    let status = next_status(shipment.status, progress_after, config);

    let current_location = if status == ShipmentStatus::Delivered {
        progress_after = 1.0;
        shipment.destination.clone()
    } else {
        let point = interpolate_position(&shipment.origin, &shipment.destination, progress_after);
        let nearest = gazetteer.nearest_city(point.lat, point.lng);
        Location {
            lat: point.lat,
            lng: point.lng,
            address: IN_TRANSIT_ADDRESS.to_string(),
            city: nearest.city,
            state: nearest.state,
            zip: nearest.zip,
        }
    };

    let transitioned = status != shipment.status;
    let history_entry = transitioned.then(|| StatusHistoryEntry {
        status,
        timestamp: now,
        location: current_location.city_label(),
        note: None,
    });
    let transition = transitioned.then(|| TransitionEvent {
        shipment_id: shipment.id.clone(),
        status,
        tracking_number: shipment.tracking_number.clone(),
        destination_label: destination_label(&shipment.destination, status),
        timestamp: now,
    });

    Ok(Advance {
        delta: ShipmentDelta {
            id: shipment.id.clone(),
            base: DeltaBase::of(shipment),
            current_location,
            status,
            updated_at: now,
            actual_delivery: (status == ShipmentStatus::Delivered).then_some(now),
            history_entry,
        },
        transition,
        progress_before,
        progress_after,
    })
}

/// The street address once delivered, `"City, ST"` before that.
fn destination_label(destination: &Location, status: ShipmentStatus) -> String {
    match status {
        ShipmentStatus::Delivered => destination.address.clone(),
        _ => destination.city_label(),
    }
}
