//! Domain Layer - Pure geometry
//!
//! This layer contains:
//! - Haversine distance and unit conversion
//! - Route progress and position interpolation
//! - Nearest-city resolution and the reference city list
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Callers validate coordinates; these functions assume valid input

pub mod cities;
pub mod distance;
pub mod route;

pub use cities::{find_nearest_city, NearestCity, ReferenceCity, US_CITIES};
pub use distance::{
    calculate_distance, format_distance, km_to_miles, miles_to_km, DistanceUnit,
    EARTH_RADIUS_KM, EARTH_RADIUS_MILES,
};
pub use route::{calculate_progress, interpolate_position, try_calculate_progress};
