//! Route progress and interpolation
//!
//! Progress is a straight-line proxy: the great-circle distance already
//! covered from the origin divided by the origin→destination distance. It is
//! only approximately monotonic along the flat interpolation used to place
//! shipments, which is accepted at the resolution of a dashboard map.

use shared_types::{GeoPoint, Location};

use super::distance::{calculate_distance, DistanceUnit};
use crate::error::GeoError;

/// Fraction of the route covered, clamped to `[0, 1]`.
///
/// A zero-length route (`origin == destination`) reports `1.0`.
pub fn calculate_progress(origin: &Location, current: &Location, destination: &Location) -> f64 {
    let total = calculate_distance(origin, destination, DistanceUnit::Miles);
    if total == 0.0 {
        return 1.0;
    }
    let covered = calculate_distance(origin, current, DistanceUnit::Miles);
    (covered / total).clamp(0.0, 1.0)
}

/// Validating variant of [`calculate_progress`].
///
/// Rejects any of the three locations with out-of-range coordinates instead
/// of producing a meaningless ratio.
pub fn try_calculate_progress(
    origin: &Location,
    current: &Location,
    destination: &Location,
) -> Result<f64, GeoError> {
    origin.validate().map_err(|e| GeoError::invalid("origin", e))?;
    current
        .validate()
        .map_err(|e| GeoError::invalid("current", e))?;
    destination
        .validate()
        .map_err(|e| GeoError::invalid("destination", e))?;
    Ok(calculate_progress(origin, current, destination))
}

/// Position at `progress` along the flat lat/lng segment from origin to
/// destination. Progress is clamped to `[0, 1]`.
///
/// Both endpoints are reproduced exactly: `0` yields the origin and `1`
/// yields the destination bit for bit.
pub fn interpolate_position(origin: &Location, destination: &Location, progress: f64) -> GeoPoint {
    let t = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    GeoPoint {
        lat: origin.lat * (1.0 - t) + destination.lat * t,
        lng: origin.lng * (1.0 - t) + destination.lng * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn equator_route() -> (Location, Location) {
        (Location::at(0.0, 0.0), Location::at(0.0, 10.0))
    }

    #[test]
    fn test_progress_at_endpoints() {
        let (origin, destination) = equator_route();
        assert_eq!(calculate_progress(&origin, &origin, &destination), 0.0);
        assert_eq!(calculate_progress(&origin, &destination, &destination), 1.0);
    }

    #[test]
    fn test_zero_length_route_is_complete() {
        let p = Location::at(35.1495, -90.0490);
        assert_eq!(calculate_progress(&p, &p, &p), 1.0);
    }

    #[test]
    fn test_progress_is_clamped_past_destination() {
        let (origin, destination) = equator_route();
        let overshoot = Location::at(0.0, 15.0);
        assert_eq!(calculate_progress(&origin, &overshoot, &destination), 1.0);
    }

    #[test]
    fn test_progress_midpoint_on_equator() {
        let (origin, destination) = equator_route();
        let mid = Location::at(0.0, 5.0);
        let p = calculate_progress(&origin, &mid, &destination);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_clamps_progress() {
        let (origin, destination) = equator_route();
        assert_eq!(interpolate_position(&origin, &destination, -0.5), origin.point());
        assert_eq!(interpolate_position(&origin, &destination, 1.5), destination.point());
        assert_eq!(interpolate_position(&origin, &destination, f64::NAN), origin.point());
    }

    #[test]
    fn test_interpolate_one_percent() {
        let (origin, destination) = equator_route();
        let p = interpolate_position(&origin, &destination, 0.01);
        assert_eq!(p.lat, 0.0);
        assert!((p.lng - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_try_progress_rejects_invalid_current() {
        let (origin, destination) = equator_route();
        let broken = Location::at(123.0, 0.0);
        let err = try_calculate_progress(&origin, &broken, &destination).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate { role: "current", .. }));
    }

    #[test]
    fn test_try_progress_accepts_valid_route() {
        let (origin, destination) = equator_route();
        let p = try_calculate_progress(&origin, &Location::at(0.0, 2.5), &destination).unwrap();
        assert!((p - 0.25).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_interpolation_reproduces_endpoints(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let origin = Location::at(lat1, lng1);
            let destination = Location::at(lat2, lng2);
            prop_assert_eq!(interpolate_position(&origin, &destination, 0.0), origin.point());
            prop_assert_eq!(interpolate_position(&origin, &destination, 1.0), destination.point());
        }

        #[test]
        fn prop_progress_endpoints_for_distinct_points(
            lat1 in -89.0f64..=89.0, lng1 in -179.0f64..=179.0,
            dlat in 0.01f64..=1.0, dlng in 0.01f64..=1.0,
        ) {
            let origin = Location::at(lat1, lng1);
            let destination = Location::at(lat1 + dlat, lng1 + dlng);
            prop_assert_eq!(calculate_progress(&origin, &origin, &destination), 0.0);
            prop_assert_eq!(calculate_progress(&origin, &destination, &destination), 1.0);
        }

        #[test]
        fn prop_progress_stays_in_unit_interval(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
            lat3 in -90.0f64..=90.0, lng3 in -180.0f64..=180.0,
        ) {
            let p = calculate_progress(
                &Location::at(lat1, lng1),
                &Location::at(lat2, lng2),
                &Location::at(lat3, lng3),
            );
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
