//! # Shared Types Crate
//!
//! This crate contains the shipment data model and the contracts that flow
//! between the shipment store, the notification log and the update engine.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Validated Coordinates**: A `Location` outside `[-90,90] x [-180,180]`
//!   is rejected by `Location::validate()` and never fed into geometry.
//! - **Deltas, not mutation**: The engine produces `ShipmentDelta` values and
//!   the store applies them in one commit.

pub mod contracts;
pub mod entities;
pub mod errors;

pub use contracts::*;
pub use entities::*;
pub use errors::*;
