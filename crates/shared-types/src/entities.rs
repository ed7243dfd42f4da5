//! # Core Domain Entities
//!
//! Defines the shipment tracking entities.
//!
//! ## Clusters
//!
//! - **Geography**: `GeoPoint`, `Location`
//! - **Lifecycle**: `ShipmentStatus`, `Priority`, `StatusHistoryEntry`
//! - **Shipment**: `Shipment`, `ShipmentId`, `Customer`, `PackageInfo`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoordinateError;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

// =============================================================================
// CLUSTER A: GEOGRAPHY
// =============================================================================

/// Minimum valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Placeholder address written while a shipment is between cities.
pub const IN_TRANSIT_ADDRESS: &str = "In transit";

/// Checks a raw coordinate pair against the valid range.
///
/// NaN and infinities are rejected along with out-of-range values.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), CoordinateError> {
    if !lat.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return Err(CoordinateError::LatitudeOutOfRange { lat });
    }
    if !lng.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng) {
        return Err(CoordinateError::LongitudeOutOfRange { lng });
    }
    Ok(())
}

/// A bare coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(&self) -> Result<(), CoordinateError> {
        validate_coordinates(self.lat, self.lng)
    }
}

/// A geographic position with its postal labels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Street address, or the in-transit placeholder.
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Location {
    /// Creates a location from coordinates and labels.
    pub fn new(
        lat: f64,
        lng: f64,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            lat,
            lng,
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    /// Creates an unlabeled location, mostly useful in tests.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            ..Default::default()
        }
    }

    /// Returns the coordinate pair.
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Validates that the coordinates are within range.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        validate_coordinates(self.lat, self.lng)
    }

    /// Returns true if the coordinates are within range.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Returns the `"City, ST"` display label.
    pub fn city_label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

// =============================================================================
// CLUSTER B: LIFECYCLE
// =============================================================================

/// Shipment lifecycle state.
///
/// ```text
/// [Pending] ──(external)──→ [InTransit] ──≥0.95──→ [OutForDelivery] ──≥1.0──→ [Delivered]
///                                │                         │
///                                └────(external)──→ [Delayed] (inactive side branch)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    OutForDelivery,
    Delivered,
    Delayed,
}

impl ShipmentStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
        ShipmentStatus::Delayed,
    ];

    /// Returns true for statuses the update engine advances.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InTransit | Self::OutForDelivery)
    }

    /// Returns true once no further transition may occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Wire name (`in_transit`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Delayed => "delayed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Pickup",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Delayed => "Delayed",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service level. Cosmetic only: never affects simulation mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Standard, Priority::Express, Priority::Overnight];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Express => "Express",
            Self::Overnight => "Overnight",
        }
    }

    /// Urgency rank, lower is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Overnight => 0,
            Self::Express => 1,
            Self::Standard => 2,
        }
    }
}

/// One entry of a shipment's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: ShipmentStatus,
    pub timestamp: Timestamp,
    /// Display label of where the change happened.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// =============================================================================
// CLUSTER C: SHIPMENT
// =============================================================================

/// Opaque, immutable shipment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(String);

impl ShipmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShipmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShipmentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Recipient contact details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Package dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Physical package information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Weight in pounds.
    pub weight: f64,
    pub dimensions: Dimensions,
    pub description: String,
}

/// The unit of tracking.
///
/// `origin`, `destination`, `tracking_number`, `priority` and `created_at`
/// are fixed at creation. `current_location` is owned by the update engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub tracking_number: String,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub priority: Priority,
    pub origin: Location,
    pub destination: Location,
    pub current_location: Location,
    pub estimated_delivery: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<Timestamp>,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub package: PackageInfo,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shipment {
    /// Creates a shipment sitting at its origin with a single history entry.
    pub fn new(
        id: impl Into<ShipmentId>,
        tracking_number: impl Into<String>,
        status: ShipmentStatus,
        origin: Location,
        destination: Location,
        created_at: Timestamp,
    ) -> Self {
        let history = StatusHistoryEntry {
            status,
            timestamp: created_at,
            location: origin.city_label(),
            note: None,
        };
        Self {
            id: id.into(),
            tracking_number: tracking_number.into(),
            status,
            priority: Priority::Standard,
            current_location: origin.clone(),
            origin,
            destination,
            estimated_delivery: created_at,
            actual_delivery: None,
            customer: Customer::default(),
            package: PackageInfo::default(),
            status_history: vec![history],
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns true if the update engine advances this shipment.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Builder-style method to set the current location.
    pub fn with_current_location(mut self, location: Location) -> Self {
        self.current_location = location;
        self
    }

    /// Builder-style method to set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder-style method to set the estimated delivery.
    pub fn with_estimated_delivery(mut self, eta: Timestamp) -> Self {
        self.estimated_delivery = eta;
        self
    }

    /// Builder-style method to set customer details.
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = customer;
        self
    }

    /// Builder-style method to set package details.
    pub fn with_package(mut self, package: PackageInfo) -> Self {
        self.package = package;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates_bounds() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(matches!(
            validate_coordinates(90.1, 0.0),
            Err(CoordinateError::LatitudeOutOfRange { .. })
        ));
        assert!(matches!(
            validate_coordinates(0.0, 180.5),
            Err(CoordinateError::LongitudeOutOfRange { .. })
        ));
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_status_activity() {
        assert!(ShipmentStatus::InTransit.is_active());
        assert!(ShipmentStatus::OutForDelivery.is_active());
        assert!(!ShipmentStatus::Pending.is_active());
        assert!(!ShipmentStatus::Delayed.is_active());
        assert!(!ShipmentStatus::Delivered.is_active());
        assert!(ShipmentStatus::Delivered.is_terminal());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&ShipmentStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        let status: ShipmentStatus = serde_json::from_str("\"in_transit\"").unwrap();
        assert_eq!(status, ShipmentStatus::InTransit);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::Overnight.rank() < Priority::Express.rank());
        assert!(Priority::Express.rank() < Priority::Standard.rank());
    }

    #[test]
    fn test_new_shipment_starts_at_origin() {
        let origin = Location::new(35.1495, -90.0490, "1 Main St", "Memphis", "TN", "38103");
        let destination = Location::new(36.1627, -86.7816, "2 Broad St", "Nashville", "TN", "37201");
        let shipment = Shipment::new(
            "s-1",
            "FDX000000000001",
            ShipmentStatus::InTransit,
            origin.clone(),
            destination,
            1_000,
        );

        assert_eq!(shipment.current_location, origin);
        assert_eq!(shipment.status_history.len(), 1);
        assert_eq!(shipment.status_history[0].location, "Memphis, TN");
        assert!(shipment.actual_delivery.is_none());
    }

    #[test]
    fn test_shipment_json_defaults() {
        let json = r#"{
            "id": "s-9",
            "tracking_number": "UPS123",
            "status": "pending",
            "origin": {"lat": 0.0, "lng": 0.0, "address": "", "city": "", "state": "", "zip": ""},
            "destination": {"lat": 0.0, "lng": 1.0, "address": "", "city": "", "state": "", "zip": ""},
            "current_location": {"lat": 0.0, "lng": 0.0, "address": "", "city": "", "state": "", "zip": ""},
            "estimated_delivery": 10,
            "created_at": 1,
            "updated_at": 1
        }"#;
        let shipment: Shipment = serde_json::from_str(json).unwrap();
        assert_eq!(shipment.id.as_str(), "s-9");
        assert_eq!(shipment.priority, Priority::Standard);
        assert!(shipment.status_history.is_empty());
    }
}
