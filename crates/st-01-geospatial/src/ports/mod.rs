//! Ports Layer
//!
//! The geocoding lookup the update engine depends on. Implementations only
//! need to hand out an ordered candidate list; ordering matters because the
//! first candidate wins ties.

use crate::domain::{find_nearest_city, NearestCity, ReferenceCity};

/// Reference city lookup (Driven Port)
pub trait CityGazetteer: Send + Sync {
    /// Ordered candidate list used for nearest-city resolution.
    fn reference_cities(&self) -> &[ReferenceCity];

    /// Resolves the display labels for a coordinate pair.
    fn nearest_city(&self, lat: f64, lng: f64) -> NearestCity {
        find_nearest_city(lat, lng, self.reference_cities())
    }
}
