//! The normalized shipment table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_types::{Shipment, ShipmentDelta, ShipmentId, ShipmentStatus, Timestamp};
use tracing::warn;

use crate::error::StoreError;

/// Id-keyed shipment records plus the display order of their ids.
///
/// `ids` and the keys of `shipments` always hold the same set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentTable {
    shipments: HashMap<ShipmentId, Shipment>,
    ids: Vec<ShipmentId>,
    /// True while a bulk load is in flight.
    pub loading: bool,
    /// Message of the last failed load.
    pub error: Option<String>,
    /// Time of the last applied batch or edit.
    pub last_updated: Option<Timestamp>,
    /// Bumped on every mutation; lets readers detect a changed snapshot.
    pub revision: u64,
}

/// What happened to a single delta inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    Applied,
    /// The id is no longer in the table.
    Stale,
    /// The target is already delivered.
    Refused,
    /// The record changed after the delta was computed, or is no longer
    /// advanced by the engine.
    Superseded,
}

/// Per-id result of one batch commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub applied: Vec<ShipmentId>,
    pub stale: Vec<ShipmentId>,
    pub refused: Vec<ShipmentId>,
    pub superseded: Vec<ShipmentId>,
}

impl CommitOutcome {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.refused.is_empty() && self.superseded.is_empty()
    }
}

impl ShipmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a list into a table, keeping the first record of any
    /// repeated id. Later records with that id are dropped with a warning.
    pub fn from_shipments(shipments: impl IntoIterator<Item = Shipment>) -> Self {
        let mut table = Self::new();
        for shipment in shipments {
            if let Err(StoreError::Duplicate(id)) = table.insert(shipment) {
                warn!(shipment_id = %id, "Dropped shipment with a repeated id");
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ShipmentId] {
        &self.ids
    }

    pub fn contains(&self, id: &ShipmentId) -> bool {
        self.shipments.contains_key(id)
    }

    pub fn get(&self, id: &ShipmentId) -> Option<&Shipment> {
        self.shipments.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ShipmentId) -> Option<&mut Shipment> {
        self.shipments.get_mut(id)
    }

    /// Records in id-list order.
    pub fn iter(&self) -> impl Iterator<Item = &Shipment> + '_ {
        self.ids.iter().filter_map(move |id| self.shipments.get(id))
    }

    /// Records with the given status, in id-list order.
    pub fn with_status(&self, status: ShipmentStatus) -> impl Iterator<Item = &Shipment> + '_ {
        self.iter().filter(move |s| s.status == status)
    }

    /// Adds a record at the end of the id list.
    pub fn insert(&mut self, shipment: Shipment) -> Result<(), StoreError> {
        if self.shipments.contains_key(&shipment.id) {
            return Err(StoreError::Duplicate(shipment.id));
        }
        self.ids.push(shipment.id.clone());
        self.shipments.insert(shipment.id.clone(), shipment);
        self.revision += 1;
        Ok(())
    }

    pub fn remove(&mut self, id: &ShipmentId) -> Option<Shipment> {
        let removed = self.shipments.remove(id)?;
        self.ids.retain(|existing| existing != id);
        self.revision += 1;
        Some(removed)
    }

    /// Replaces all records, keeping the loading and error flags.
    pub fn replace_all(&mut self, shipments: impl IntoIterator<Item = Shipment>) {
        let fresh = Self::from_shipments(shipments);
        self.shipments = fresh.shipments;
        self.ids = fresh.ids;
        self.revision += 1;
    }

    /// Applies one engine delta.
    ///
    /// Delivered rows are terminal and refuse any delta. A row that is no
    /// longer active, or whose status or location differ from the delta's
    /// base, was edited after the snapshot and keeps the edit.
    /// `actual_delivery` is only written when still unset.
    pub fn apply_delta(&mut self, delta: ShipmentDelta) -> DeltaOutcome {
        let Some(shipment) = self.shipments.get_mut(&delta.id) else {
            return DeltaOutcome::Stale;
        };
        if shipment.status == ShipmentStatus::Delivered {
            return DeltaOutcome::Refused;
        }
        if !shipment.status.is_active() || !delta.base.matches(shipment) {
            return DeltaOutcome::Superseded;
        }

        shipment.current_location = delta.current_location;
        shipment.status = delta.status;
        shipment.updated_at = delta.updated_at;
        if shipment.actual_delivery.is_none() {
            shipment.actual_delivery = delta.actual_delivery;
        }
        if let Some(entry) = delta.history_entry {
            shipment.status_history.push(entry);
        }
        DeltaOutcome::Applied
    }

    /// Applies every delta of a tick. Never fails; dropped ids are reported.
    pub fn apply_batch(&mut self, deltas: Vec<ShipmentDelta>, now: Timestamp) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();
        for delta in deltas {
            let id = delta.id.clone();
            match self.apply_delta(delta) {
                DeltaOutcome::Applied => outcome.applied.push(id),
                DeltaOutcome::Stale => outcome.stale.push(id),
                DeltaOutcome::Refused => outcome.refused.push(id),
                DeltaOutcome::Superseded => outcome.superseded.push(id),
            }
        }
        if !outcome.applied.is_empty() {
            self.last_updated = Some(now);
            self.revision += 1;
        }
        outcome
    }
}
