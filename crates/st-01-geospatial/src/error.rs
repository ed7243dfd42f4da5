//! Error types for the geospatial module

use shared_types::CoordinateError;
use thiserror::Error;

/// Errors that can occur in geospatial computations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid {role} coordinate: {source}")]
    InvalidCoordinate {
        role: &'static str,
        #[source]
        source: CoordinateError,
    },
}

impl GeoError {
    pub(crate) fn invalid(role: &'static str, source: CoordinateError) -> Self {
        Self::InvalidCoordinate { role, source }
    }
}
