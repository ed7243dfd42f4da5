//! Great-circle distance
//!
//! Haversine formula over a spherical Earth:
//!
//! ```text
//! a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
//! c = 2 · atan2(√a, √(1−a))
//! d = R · c
//! ```

use serde::{Deserialize, Serialize};
use shared_types::Location;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_PER_MILE: f64 = 1.60934;
const MILES_PER_KM: f64 = 0.621371;

/// Unit for distance results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Km,
}

impl DistanceUnit {
    /// Earth radius expressed in this unit.
    pub fn earth_radius(&self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS_MILES,
            Self::Km => EARTH_RADIUS_KM,
        }
    }
}

/// Great-circle distance between two locations.
///
/// Returns `0.0` for coincident points. Coordinates are assumed valid.
pub fn calculate_distance(a: &Location, b: &Location, unit: DistanceUnit) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();
    let h = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;

    // Rounding can push h a hair above 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    unit.earth_radius() * c
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

/// Formats the distance in both units, e.g. `"2,454 mi (3,949 km)"`.
pub fn format_distance(a: &Location, b: &Location) -> String {
    let miles = calculate_distance(a, b, DistanceUnit::Miles);
    let km = miles_to_km(miles);
    format!(
        "{} mi ({} km)",
        group_thousands(miles.round() as u64),
        group_thousands(km.round() as u64)
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_york() -> Location {
        Location::at(40.7128, -74.0060)
    }

    fn los_angeles() -> Location {
        Location::at(34.0522, -118.2437)
    }

    #[test]
    fn test_coincident_points_are_zero() {
        let a = new_york();
        assert_eq!(calculate_distance(&a, &a, DistanceUnit::Miles), 0.0);
        assert_eq!(calculate_distance(&a, &a, DistanceUnit::Km), 0.0);
    }

    #[test]
    fn test_new_york_to_los_angeles() {
        let miles = calculate_distance(&new_york(), &los_angeles(), DistanceUnit::Miles);
        let km = calculate_distance(&new_york(), &los_angeles(), DistanceUnit::Km);

        // Published great-circle distance is ~2445 mi / ~3936 km
        assert!((miles - 2445.0).abs() < 10.0, "got {miles}");
        assert!((km - 3936.0).abs() < 15.0, "got {km}");
    }

    #[test]
    fn test_pure_longitude_route_on_equator() {
        // One degree of arc on the equator
        let d = calculate_distance(&Location::at(0.0, 0.0), &Location::at(0.0, 1.0), DistanceUnit::Km);
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn test_default_unit_is_miles() {
        assert_eq!(DistanceUnit::default(), DistanceUnit::Miles);
    }

    #[test]
    fn test_unit_conversion_round_trip_is_close() {
        let km = miles_to_km(100.0);
        assert!((km - 160.934).abs() < 1e-9);
        assert!((km_to_miles(km) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_format_distance_groups_thousands() {
        let formatted = format_distance(&new_york(), &los_angeles());
        assert!(formatted.starts_with("2,4"), "got {formatted}");
        assert!(formatted.contains(" mi (3,9"), "got {formatted}");
        assert!(formatted.ends_with(" km)"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    proptest! {
        #[test]
        fn prop_distance_to_self_is_zero(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let a = Location::at(lat, lng);
            prop_assert_eq!(calculate_distance(&a, &a, DistanceUnit::Miles), 0.0);
        }

        #[test]
        fn prop_distance_is_symmetric_and_non_negative(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let a = Location::at(lat1, lng1);
            let b = Location::at(lat2, lng2);
            let ab = calculate_distance(&a, &b, DistanceUnit::Km);
            let ba = calculate_distance(&b, &a, DistanceUnit::Km);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-6);
            // Never more than half the circumference
            prop_assert!(ab <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
