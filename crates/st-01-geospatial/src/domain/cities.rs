//! Nearest-city resolution
//!
//! Distance is Euclidean in degree space rather than geodesic. It is cheap
//! and consistent, which is all a display label needs.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A candidate city for labeling positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCity {
    pub lat: f64,
    pub lng: f64,
    pub city: Cow<'static, str>,
    pub state: Cow<'static, str>,
    pub zip: Cow<'static, str>,
}

impl ReferenceCity {
    /// Compile-time constructor for the static reference list.
    pub const fn fixed(
        lat: f64,
        lng: f64,
        city: &'static str,
        state: &'static str,
        zip: &'static str,
    ) -> Self {
        Self {
            lat,
            lng,
            city: Cow::Borrowed(city),
            state: Cow::Borrowed(state),
            zip: Cow::Borrowed(zip),
        }
    }

    /// Runtime constructor for lists loaded from configuration.
    pub fn new(
        lat: f64,
        lng: f64,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            lat,
            lng,
            city: Cow::Owned(city.into()),
            state: Cow::Owned(state.into()),
            zip: Cow::Owned(zip.into()),
        }
    }

    fn degree_distance(&self, lat: f64, lng: f64) -> f64 {
        (self.lat - lat).hypot(self.lng - lng)
    }
}

/// Postal labels of the resolved city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestCity {
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl NearestCity {
    /// Sentinel returned when no candidates are available.
    pub fn unknown() -> Self {
        Self {
            city: "Unknown".to_string(),
            state: "Unknown".to_string(),
            zip: "00000".to_string(),
        }
    }
}

impl From<&ReferenceCity> for NearestCity {
    fn from(city: &ReferenceCity) -> Self {
        Self {
            city: city.city.to_string(),
            state: city.state.to_string(),
            zip: city.zip.to_string(),
        }
    }
}

/// Returns the candidate closest to `(lat, lng)`.
///
/// The first candidate wins exact ties. An empty list yields
/// [`NearestCity::unknown`].
pub fn find_nearest_city(lat: f64, lng: f64, cities: &[ReferenceCity]) -> NearestCity {
    let Some((first, rest)) = cities.split_first() else {
        return NearestCity::unknown();
    };

    let mut nearest = first;
    let mut min_distance = first.degree_distance(lat, lng);
    for candidate in rest {
        let distance = candidate.degree_distance(lat, lng);
        if distance < min_distance {
            min_distance = distance;
            nearest = candidate;
        }
    }

    NearestCity::from(nearest)
}

/// Major US cities with real coordinates.
pub static US_CITIES: &[ReferenceCity] = &[
    ReferenceCity::fixed(40.7128, -74.0060, "New York", "NY", "10001"),
    ReferenceCity::fixed(34.0522, -118.2437, "Los Angeles", "CA", "90001"),
    ReferenceCity::fixed(41.8781, -87.6298, "Chicago", "IL", "60601"),
    ReferenceCity::fixed(29.7604, -95.3698, "Houston", "TX", "77001"),
    ReferenceCity::fixed(33.4484, -112.0740, "Phoenix", "AZ", "85001"),
    ReferenceCity::fixed(39.7392, -104.9903, "Denver", "CO", "80201"),
    ReferenceCity::fixed(47.6062, -122.3321, "Seattle", "WA", "98101"),
    ReferenceCity::fixed(37.7749, -122.4194, "San Francisco", "CA", "94102"),
    ReferenceCity::fixed(32.7157, -117.1611, "San Diego", "CA", "92101"),
    ReferenceCity::fixed(25.7617, -80.1918, "Miami", "FL", "33101"),
    ReferenceCity::fixed(33.7490, -84.3880, "Atlanta", "GA", "30301"),
    ReferenceCity::fixed(42.3601, -71.0589, "Boston", "MA", "02101"),
    ReferenceCity::fixed(39.9526, -75.1652, "Philadelphia", "PA", "19101"),
    ReferenceCity::fixed(35.1495, -90.0490, "Memphis", "TN", "38103"),
    ReferenceCity::fixed(36.1627, -86.7816, "Nashville", "TN", "37201"),
    ReferenceCity::fixed(30.2672, -97.7431, "Austin", "TX", "78701"),
    ReferenceCity::fixed(32.7767, -96.7970, "Dallas", "TX", "75201"),
    ReferenceCity::fixed(38.9072, -77.0369, "Washington", "DC", "20001"),
    ReferenceCity::fixed(45.5152, -122.6784, "Portland", "OR", "97201"),
    ReferenceCity::fixed(39.7684, -86.1581, "Indianapolis", "IN", "46201"),
    ReferenceCity::fixed(35.2271, -80.8431, "Charlotte", "NC", "28201"),
    ReferenceCity::fixed(43.0389, -87.9065, "Milwaukee", "WI", "53201"),
    ReferenceCity::fixed(36.7378, -119.7871, "Fresno", "CA", "93701"),
    ReferenceCity::fixed(38.5816, -121.4944, "Sacramento", "CA", "94203"),
    ReferenceCity::fixed(40.7608, -111.8910, "Salt Lake City", "UT", "84101"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_list_returns_sentinel() {
        let nearest = find_nearest_city(10.0, 10.0, &[]);
        assert_eq!(nearest, NearestCity::unknown());
        assert_eq!(nearest.zip, "00000");
    }

    #[test]
    fn test_resolves_exact_city() {
        let nearest = find_nearest_city(35.1495, -90.0490, US_CITIES);
        assert_eq!(nearest.city, "Memphis");
        assert_eq!(nearest.state, "TN");
    }

    #[test]
    fn test_resolves_closest_between_cities() {
        // Just outside Dallas, far from Austin and Houston
        let nearest = find_nearest_city(32.9, -96.9, US_CITIES);
        assert_eq!(nearest.city, "Dallas");
    }

    #[test]
    fn test_first_city_wins_exact_tie() {
        let cities = vec![
            ReferenceCity::new(0.0, 1.0, "East", "EE", "11111"),
            ReferenceCity::new(0.0, -1.0, "West", "WW", "22222"),
        ];
        let nearest = find_nearest_city(0.0, 0.0, &cities);
        assert_eq!(nearest.city, "East");

        let reversed: Vec<_> = cities.into_iter().rev().collect();
        let nearest = find_nearest_city(0.0, 0.0, &reversed);
        assert_eq!(nearest.city, "West");
    }

    #[test]
    fn test_reference_list_is_valid() {
        assert_eq!(US_CITIES.len(), 25);
        for city in US_CITIES {
            assert!(shared_types::validate_coordinates(city.lat, city.lng).is_ok());
        }
    }

    proptest! {
        #[test]
        fn prop_single_candidate_always_wins(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let only = [ReferenceCity::new(12.0, 34.0, "Solo", "SO", "99999")];
            let nearest = find_nearest_city(lat, lng, &only);
            prop_assert_eq!(nearest.city.as_str(), "Solo");
        }
    }
}
