//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised when a coordinate pair leaves the valid WGS-84 range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("Invalid latitude: {lat} (must be within [-90, 90])")]
    LatitudeOutOfRange { lat: f64 },

    /// Longitude outside `[-180, 180]` or not finite.
    #[error("Invalid longitude: {lng} (must be within [-180, 180])")]
    LongitudeOutOfRange { lng: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_value() {
        let err = CoordinateError::LatitudeOutOfRange { lat: 91.5 };
        assert!(err.to_string().contains("91.5"));

        let err = CoordinateError::LongitudeOutOfRange { lng: -181.0 };
        assert!(err.to_string().contains("-181"));
    }
}
