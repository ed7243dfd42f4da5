//! Error types for the shipment store

use shared_types::{CoordinateError, ShipmentId};
use thiserror::Error;

/// Errors returned by single-record store operations.
///
/// Batch commits never fail; they report dropped ids in `CommitOutcome`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Shipment not found: {0}")]
    NotFound(ShipmentId),

    #[error("Shipment already exists: {0}")]
    Duplicate(ShipmentId),

    #[error("Invalid location for shipment {id}: {source}")]
    InvalidLocation {
        id: ShipmentId,
        #[source]
        source: CoordinateError,
    },
}
