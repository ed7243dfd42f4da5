//! Shipment Store Service
//!
//! Thread-safe wrapper around `ShipmentTable`.

mod shipment_store;

pub use shipment_store::ShipmentStore;
