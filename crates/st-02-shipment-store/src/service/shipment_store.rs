//! Shipment Store
//!
//! Single-writer, multi-reader shipment table. Every write takes the lock
//! once, so a reader sees either the table before a commit or after it.

use parking_lot::RwLock;
use shared_types::{Location, Shipment, ShipmentDelta, ShipmentId, Timestamp};
use tracing::{debug, info, warn};

use crate::domain::{CommitOutcome, ShipmentPatch, ShipmentTable};
use crate::error::StoreError;

/// Owner of every shipment record.
///
/// Shared as `Arc<ShipmentStore>` between the update engine and user-edit
/// callers. There is no global instance.
#[derive(Debug, Default)]
pub struct ShipmentStore {
    table: RwLock<ShipmentTable>,
}

impl ShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shipments(shipments: impl IntoIterator<Item = Shipment>) -> Self {
        Self {
            table: RwLock::new(ShipmentTable::from_shipments(shipments)),
        }
    }

    /// A consistent copy of the whole table.
    pub fn snapshot(&self) -> ShipmentTable {
        self.table.read().clone()
    }

    /// Runs `f` against the table under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&ShipmentTable) -> R) -> R {
        f(&self.table.read())
    }

    pub fn get(&self, id: &ShipmentId) -> Option<Shipment> {
        self.table.read().get(id).cloned()
    }

    pub fn ids(&self) -> Vec<ShipmentId> {
        self.table.read().ids().to_vec()
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    pub fn last_updated(&self) -> Option<Timestamp> {
        self.table.read().last_updated
    }

    pub fn revision(&self) -> u64 {
        self.table.read().revision
    }

    pub fn is_loading(&self) -> bool {
        self.table.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.table.read().error.clone()
    }

    pub fn add_shipment(&self, shipment: Shipment, now: Timestamp) -> Result<(), StoreError> {
        let id = shipment.id.clone();
        let mut table = self.table.write();
        table.insert(shipment)?;
        table.last_updated = Some(now);
        debug!(shipment_id = %id, "Shipment added");
        Ok(())
    }

    /// Marks a bulk load as in flight and clears the previous error.
    pub fn begin_loading(&self) {
        let mut table = self.table.write();
        table.loading = true;
        table.error = None;
    }

    /// Replaces the table with a freshly loaded fleet.
    pub fn load_shipments(&self, shipments: Vec<Shipment>, now: Timestamp) {
        let count = shipments.len();
        let mut table = self.table.write();
        table.replace_all(shipments);
        table.loading = false;
        table.error = None;
        table.last_updated = Some(now);
        info!(requested = count, stored = table.len(), "Shipments loaded");
    }

    pub fn fail_loading(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "Shipment load failed");
        let mut table = self.table.write();
        table.loading = false;
        table.error = Some(message);
    }

    /// Applies a partial user edit.
    pub fn update_shipment(
        &self,
        id: &ShipmentId,
        patch: ShipmentPatch,
        now: Timestamp,
    ) -> Result<Shipment, StoreError> {
        if let Some(location) = &patch.current_location {
            location
                .validate()
                .map_err(|source| StoreError::InvalidLocation {
                    id: id.clone(),
                    source,
                })?;
        }

        let mut table = self.table.write();
        let shipment = table
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        patch.apply_to(shipment, now);
        let updated = shipment.clone();
        table.last_updated = Some(now);
        table.revision += 1;

        debug!(shipment_id = %id, status = %updated.status, "Shipment updated");
        Ok(updated)
    }

    /// Moves a shipment without touching its status.
    pub fn update_location(
        &self,
        id: &ShipmentId,
        location: Location,
        now: Timestamp,
    ) -> Result<Shipment, StoreError> {
        self.update_shipment(id, ShipmentPatch::new().current_location(location), now)
    }

    pub fn delete_shipment(&self, id: &ShipmentId) -> Result<Shipment, StoreError> {
        let removed = self
            .table
            .write()
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        debug!(shipment_id = %id, "Shipment deleted");
        Ok(removed)
    }

    /// Applies a whole tick's deltas in one write-lock critical section.
    pub fn commit_batch(&self, deltas: Vec<ShipmentDelta>, now: Timestamp) -> CommitOutcome {
        let submitted = deltas.len();
        let outcome = self.table.write().apply_batch(deltas, now);

        if !outcome.stale.is_empty() {
            debug!(stale = ?outcome.stale, "Dropped deltas for missing shipments");
        }
        if !outcome.refused.is_empty() {
            warn!(refused = ?outcome.refused, "Refused deltas for delivered shipments");
        }
        if !outcome.superseded.is_empty() {
            info!(
                superseded = ?outcome.superseded,
                "Kept edits made after the tick snapshot"
            );
        }
        debug!(
            submitted,
            applied = outcome.applied_count(),
            "Batch committed"
        );
        outcome
    }
}
