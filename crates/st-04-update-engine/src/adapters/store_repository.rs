//! `ShipmentRepository` over the in-process shipment store.

use std::sync::Arc;

use shared_types::{Shipment, ShipmentDelta, ShipmentId, Timestamp};
use st_02_shipment_store::{CommitOutcome, ShipmentStore};

use crate::ports::ShipmentRepository;

pub struct StoreRepositoryAdapter {
    store: Arc<ShipmentStore>,
}

impl StoreRepositoryAdapter {
    pub fn new(store: Arc<ShipmentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ShipmentStore> {
        &self.store
    }
}

impl ShipmentRepository for StoreRepositoryAdapter {
    fn snapshot(&self) -> Vec<Shipment> {
        self.store.read(|table| table.iter().cloned().collect())
    }

    fn get(&self, id: &ShipmentId) -> Option<Shipment> {
        self.store.get(id)
    }

    fn commit_batch(&self, deltas: Vec<ShipmentDelta>, now: Timestamp) -> CommitOutcome {
        self.store.commit_batch(deltas, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Location, ShipmentStatus};

    #[test]
    fn test_snapshot_keeps_id_order() {
        let make = |id: &str| {
            Shipment::new(
                id,
                id,
                ShipmentStatus::InTransit,
                Location::at(0.0, 0.0),
                Location::at(1.0, 1.0),
                0,
            )
        };
        let store = Arc::new(ShipmentStore::with_shipments(vec![make("c"), make("a"), make("b")]));
        let adapter = StoreRepositoryAdapter::new(store);

        let ids: Vec<ShipmentId> = adapter.snapshot().into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![ShipmentId::new("c"), ShipmentId::new("a"), ShipmentId::new("b")]
        );
    }

    #[test]
    fn test_get_reads_one_record() {
        let store = Arc::new(ShipmentStore::with_shipments(vec![Shipment::new(
            "a",
            "TRK-a",
            ShipmentStatus::InTransit,
            Location::at(0.0, 0.0),
            Location::at(1.0, 1.0),
            0,
        )]));
        let adapter = StoreRepositoryAdapter::new(store);

        assert_eq!(
            adapter.get(&ShipmentId::new("a")).map(|s| s.tracking_number),
            Some("TRK-a".to_string())
        );
        assert!(adapter.get(&ShipmentId::new("b")).is_none());
    }
}
