//! # Domain Layer - Shipment Store
//!
//! - `table`: the normalized `ShipmentTable` and batch application
//! - `patch`: `ShipmentPatch` for partial user edits

pub mod patch;
pub mod table;

pub use patch::ShipmentPatch;
pub use table::{CommitOutcome, DeltaOutcome, ShipmentTable};
