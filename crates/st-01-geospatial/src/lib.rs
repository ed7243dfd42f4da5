//! # ST-01 Geospatial
//!
//! Pure geometry used by the update engine to move shipments along their
//! routes and to label where they are.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure functions, no state, no I/O
//!   - `calculate_distance`: Haversine great-circle distance
//!   - `calculate_progress`: fraction of the straight-line route covered
//!   - `interpolate_position`: flat lat/lng interpolation
//!   - `find_nearest_city`: degree-space nearest neighbour over a city list
//!   - `US_CITIES`: the reference city list
//!
//! - **Ports Layer** (`ports/`): `CityGazetteer`, the geocoding lookup
//!
//! - **Adapters Layer** (`adapters/`): `StaticGazetteer`, an in-memory list
//!
//! ## Invariants
//!
//! - `calculate_distance(a, a, _) == 0`
//! - `calculate_progress(o, o, d) == 0` and `calculate_progress(o, d, d) == 1`
//!   for `o != d`; a zero-length route reports progress `1`
//! - `interpolate_position(o, d, 0) == o` and `interpolate_position(o, d, 1) == d`
//!
//! ## Usage Example
//!
//! ```ignore
//! use st_01_geospatial::{calculate_progress, interpolate_position, find_nearest_city, US_CITIES};
//!
//! let progress = calculate_progress(&origin, &current, &destination);
//! let next = interpolate_position(&origin, &destination, progress + 0.01);
//! let label = find_nearest_city(next.lat, next.lng, US_CITIES);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::StaticGazetteer;
pub use domain::{
    calculate_distance, calculate_progress, find_nearest_city, format_distance,
    interpolate_position, km_to_miles, miles_to_km, try_calculate_progress, DistanceUnit,
    NearestCity, ReferenceCity, EARTH_RADIUS_KM, EARTH_RADIUS_MILES, US_CITIES,
};
pub use error::GeoError;
pub use ports::CityGazetteer;
