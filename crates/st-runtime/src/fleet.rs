//! # Fleet Sources
//!
//! The runtime starts from either a JSON fleet file or a generated demo
//! fleet. Generation is deterministic for a given size and start time.

use std::fs;
use std::path::Path;

use shared_types::{
    Customer, Dimensions, Location, PackageInfo, Priority, Shipment, ShipmentStatus,
    StatusHistoryEntry, Timestamp, IN_TRANSIT_ADDRESS,
};
use st_01_geospatial::{find_nearest_city, interpolate_position, ReferenceCity, US_CITIES};
use tracing::{info, warn};

use crate::error::RuntimeError;

const HOUR_MS: Timestamp = 3_600_000;
const DAY_MS: Timestamp = 24 * HOUR_MS;

const STATUS_CYCLE: [ShipmentStatus; 10] = [
    ShipmentStatus::InTransit,
    ShipmentStatus::InTransit,
    ShipmentStatus::InTransit,
    ShipmentStatus::OutForDelivery,
    ShipmentStatus::InTransit,
    ShipmentStatus::Pending,
    ShipmentStatus::Delivered,
    ShipmentStatus::InTransit,
    ShipmentStatus::Delayed,
    ShipmentStatus::Delivered,
];

const CARRIER_PREFIXES: [&str; 4] = ["FDX", "UPS", "USPS", "DHL"];

const CUSTOMERS: [&str; 8] = [
    "Avery Chen",
    "Jordan Ellis",
    "Priya Raman",
    "Marcus Webb",
    "Sofia Alvarez",
    "Noah Brooks",
    "Hana Sato",
    "Dylan Moore",
];

const CONTENTS: [&str; 5] = [
    "Electronics",
    "Apparel",
    "Books",
    "Medical supplies",
    "Machine parts",
];

const DELAY_NOTES: [&str; 4] = [
    "Weather delay",
    "Mechanical issue",
    "Customs clearance",
    "Address verification needed",
];

/// Reads a JSON array of shipments from `path`.
pub fn load_fleet(path: &Path) -> Result<Vec<Shipment>, RuntimeError> {
    let raw = fs::read_to_string(path).map_err(|source| RuntimeError::FleetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let shipments: Vec<Shipment> =
        serde_json::from_str(&raw).map_err(|source| RuntimeError::FleetParse {
            path: path.to_path_buf(),
            source,
        })?;

    let invalid = shipments
        .iter()
        .filter(|s| {
            !(s.origin.is_valid() && s.destination.is_valid() && s.current_location.is_valid())
        })
        .count();
    if invalid > 0 {
        warn!(invalid, "Fleet file contains shipments with out-of-range coordinates");
    }
    info!(path = ?path, count = shipments.len(), "Loaded fleet file");
    Ok(shipments)
}

/// Builds `size` shipments between the reference cities, spread across
/// every status, priority and the last seven days.
pub fn demo_fleet(size: usize, now: Timestamp) -> Vec<Shipment> {
    (0..size).map(|i| demo_shipment(i, now)).collect()
}

fn demo_shipment(i: usize, now: Timestamp) -> Shipment {
    let cities = US_CITIES.len();
    let origin_city = &US_CITIES[i % cities];
    let mut destination_index = (i * 7 + 3) % cities;
    if destination_index == i % cities {
        destination_index = (destination_index + 1) % cities;
    }
    let destination_city = &US_CITIES[destination_index];

    let origin = city_location(origin_city, format!("{} Commerce St", 100 + i));
    let destination = city_location(destination_city, format!("{} Oak Ave", 200 + i * 3));
    let status = STATUS_CYCLE[i % STATUS_CYCLE.len()];
    let priority = Priority::ALL[i % Priority::ALL.len()];

    let progress = match status {
        ShipmentStatus::Pending => 0.0,
        ShipmentStatus::InTransit => 0.05 + ((i * 13) % 85) as f64 / 100.0,
        ShipmentStatus::Delayed => 0.3 + (i % 5) as f64 / 10.0,
        ShipmentStatus::OutForDelivery => 0.96,
        ShipmentStatus::Delivered => 1.0,
    };
    let current = match status {
        ShipmentStatus::Pending => origin.clone(),
        ShipmentStatus::Delivered => destination.clone(),
        _ => {
            let point = interpolate_position(&origin, &destination, progress);
            let nearest = find_nearest_city(point.lat, point.lng, US_CITIES);
            Location::new(
                point.lat,
                point.lng,
                IN_TRANSIT_ADDRESS,
                nearest.city,
                nearest.state,
                nearest.zip,
            )
        }
    };

    let created_at = now.saturating_sub((i % 7) as u64 * DAY_MS + (i % 5 + 1) as u64 * HOUR_MS);
    let transit_days = match priority {
        Priority::Overnight => 1,
        Priority::Express => 3,
        Priority::Standard => 5,
    };
    let eta = created_at + transit_days * DAY_MS;

    let name = CUSTOMERS[i % CUSTOMERS.len()];
    let customer = Customer {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: format!("555-01{:02}", i % 100),
    };
    let package = PackageInfo {
        weight: 0.5 + (i % 20) as f64 * 1.5,
        dimensions: Dimensions {
            length: 10.0 + (i % 4) as f64 * 5.0,
            width: 8.0 + (i % 3) as f64 * 4.0,
            height: 4.0 + (i % 5) as f64 * 2.0,
        },
        description: CONTENTS[i % CONTENTS.len()].to_string(),
    };

    let tracking_number = format!(
        "{}{:012}",
        CARRIER_PREFIXES[i % CARRIER_PREFIXES.len()],
        (i as u64 + 1) * 7_919_111
    );

    let mut shipment = Shipment::new(
        format!("shp-{:04}", i + 1),
        tracking_number,
        ShipmentStatus::Pending,
        origin,
        destination,
        created_at,
    )
    .with_priority(priority)
    .with_estimated_delivery(eta)
    .with_customer(customer)
    .with_package(package)
    .with_current_location(current);
    shipment.status_history[0].note = Some("Package received at facility".to_string());

    if status == ShipmentStatus::Delivered {
        let late = i % 3 == 0;
        shipment.actual_delivery = Some(if late {
            eta + 2 * HOUR_MS
        } else {
            eta.saturating_sub(4 * HOUR_MS).max(created_at + 6 * HOUR_MS)
        });
    }
    replay_history(&mut shipment, status, i);
    shipment.status = status;
    shipment.updated_at = shipment
        .status_history
        .iter()
        .map(|entry| entry.timestamp)
        .max()
        .unwrap_or(created_at);
    shipment
}

fn city_location(city: &ReferenceCity, address: String) -> Location {
    Location::new(
        city.lat,
        city.lng,
        address,
        city.city.to_string(),
        city.state.to_string(),
        city.zip.to_string(),
    )
}

/// Appends the history a shipment in `status` would have accumulated.
fn replay_history(shipment: &mut Shipment, status: ShipmentStatus, i: usize) {
    if status == ShipmentStatus::Pending {
        return;
    }
    let start = shipment.created_at;
    let delivered_at = shipment.actual_delivery.unwrap_or(start + 24 * HOUR_MS);
    let origin_label = shipment.origin.city_label();
    let current_label = shipment.current_location.city_label();
    let destination_label = shipment.destination.city_label();
    let destination_address = shipment.destination.address.clone();

    let mut push = |entry_status: ShipmentStatus, timestamp: Timestamp, location: String, note: &str| {
        shipment.status_history.push(StatusHistoryEntry {
            status: entry_status,
            timestamp,
            location,
            note: Some(note.to_string()),
        });
    };

    push(
        ShipmentStatus::InTransit,
        start + 2 * HOUR_MS,
        origin_label,
        "Package departed facility",
    );
    match status {
        ShipmentStatus::Delayed => push(
            ShipmentStatus::Delayed,
            start + 12 * HOUR_MS,
            current_label,
            DELAY_NOTES[i % DELAY_NOTES.len()],
        ),
        ShipmentStatus::OutForDelivery => push(
            ShipmentStatus::OutForDelivery,
            start + 20 * HOUR_MS,
            destination_label,
            "Out for delivery",
        ),
        ShipmentStatus::Delivered => {
            push(
                ShipmentStatus::OutForDelivery,
                delivered_at - 4 * HOUR_MS,
                destination_label,
                "Out for delivery",
            );
            push(
                ShipmentStatus::Delivered,
                delivered_at,
                destination_address,
                "Delivered",
            );
        }
        ShipmentStatus::Pending | ShipmentStatus::InTransit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NOW: Timestamp = 1_700_000_000_000;

    #[test]
    fn test_demo_fleet_is_deterministic() {
        assert_eq!(demo_fleet(20, NOW), demo_fleet(20, NOW));
        assert!(demo_fleet(0, NOW).is_empty());
    }

    #[test]
    fn test_demo_fleet_covers_statuses() {
        let fleet = demo_fleet(50, NOW);
        for status in ShipmentStatus::ALL {
            assert!(
                fleet.iter().any(|s| s.status == status),
                "no {status} shipment"
            );
        }
        let mut ids: Vec<_> = fleet.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_demo_shipments_are_consistent() {
        for s in demo_fleet(50, NOW) {
            assert!(s.origin.is_valid() && s.destination.is_valid());
            assert!(s.current_location.is_valid());
            assert_ne!(s.origin.point(), s.destination.point(), "{}", s.id);
            assert!(s.created_at <= NOW);
            assert_eq!(s.status_history.last().map(|e| e.status), Some(s.status));

            match s.status {
                ShipmentStatus::Delivered => {
                    assert_eq!(s.current_location, s.destination);
                    assert!(s.actual_delivery.is_some());
                }
                ShipmentStatus::Pending => assert_eq!(s.current_location, s.origin),
                ShipmentStatus::InTransit => {
                    assert_eq!(s.current_location.address, IN_TRANSIT_ADDRESS);
                    assert!(s.actual_delivery.is_none());
                }
                _ => assert!(s.actual_delivery.is_none()),
            }
        }
    }

    #[test]
    fn test_load_fleet_round_trips_file() {
        let fleet = demo_fleet(3, NOW);
        let path = std::env::temp_dir().join(format!("st-fleet-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).expect("create temp file");
        file.write_all(serde_json::to_string(&fleet).expect("serialize").as_bytes())
            .expect("write temp file");

        let loaded = load_fleet(&path).expect("valid fleet file");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.len(), 3);
        for (loaded, original) in loaded.iter().zip(&fleet) {
            assert_eq!(loaded.id, original.id);
            assert_eq!(loaded.status, original.status);
            assert_eq!(loaded.status_history.len(), original.status_history.len());
        }
    }

    #[test]
    fn test_load_fleet_errors() {
        let missing = std::env::temp_dir().join("st-fleet-does-not-exist.json");
        assert!(matches!(
            load_fleet(&missing),
            Err(RuntimeError::FleetRead { .. })
        ));

        let path = std::env::temp_dir().join(format!("st-fleet-bad-{}.json", std::process::id()));
        fs::write(&path, "{\"not\": \"an array\"}").expect("write temp file");
        let result = load_fleet(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(RuntimeError::FleetParse { .. })));
    }
}
