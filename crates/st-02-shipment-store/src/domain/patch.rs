//! Partial shipment edits.
//!
//! Only mutable fields are patchable. Identity, tracking number, priority,
//! origin, destination and creation time are fixed for the life of a record.

use serde::{Deserialize, Serialize};
use shared_types::{
    Customer, Location, PackageInfo, Shipment, ShipmentStatus, StatusHistoryEntry, Timestamp,
};

/// A user-initiated partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPatch {
    pub status: Option<ShipmentStatus>,
    pub current_location: Option<Location>,
    pub estimated_delivery: Option<Timestamp>,
    /// Ignored when the shipment already carries a delivery time.
    pub actual_delivery: Option<Timestamp>,
    pub customer: Option<Customer>,
    pub package: Option<PackageInfo>,
    /// Recorded on the history entry when `status` changes.
    pub note: Option<String>,
}

impl ShipmentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ShipmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn current_location(mut self, location: Location) -> Self {
        self.current_location = Some(location);
        self
    }

    pub fn estimated_delivery(mut self, eta: Timestamp) -> Self {
        self.estimated_delivery = Some(eta);
        self
    }

    pub fn actual_delivery(mut self, at: Timestamp) -> Self {
        self.actual_delivery = Some(at);
        self
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn package(mut self, package: PackageInfo) -> Self {
        self.package = Some(package);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Applies the patch to a record and bumps `updated_at`.
    ///
    /// A status change appends one history entry stamped `now`.
    pub(crate) fn apply_to(self, shipment: &mut Shipment, now: Timestamp) {
        if let Some(location) = self.current_location {
            shipment.current_location = location;
        }
        if let Some(status) = self.status {
            if status != shipment.status {
                shipment.status = status;
                shipment.status_history.push(StatusHistoryEntry {
                    status,
                    timestamp: now,
                    location: shipment.current_location.city_label(),
                    note: self.note,
                });
            }
        }
        if let Some(eta) = self.estimated_delivery {
            shipment.estimated_delivery = eta;
        }
        if shipment.actual_delivery.is_none() {
            shipment.actual_delivery = self.actual_delivery;
        }
        if let Some(customer) = self.customer {
            shipment.customer = customer;
        }
        if let Some(package) = self.package {
            shipment.package = package;
        }
        shipment.updated_at = now;
    }
}
