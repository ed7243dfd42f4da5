//! # ST-02 Shipment Store
//!
//! **Owns:** every `Shipment` record.
//! **Writers:** the update engine (batch commits) and explicit user edits.
//! **Readers:** UI subscribers and the fleet queries, through snapshots.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Unique ids, `ids` mirrors `shipments` keys | `domain/table.rs` - `insert()` / `remove()` |
//! | INVARIANT-2 | Batch commit is all-or-nothing for readers | `service/shipment_store.rs` - single write lock |
//! | INVARIANT-3 | Delivered shipments are never changed by a batch | `domain/table.rs` - `apply_delta()` |
//! | INVARIANT-4 | `actual_delivery` is written at most once | `domain/table.rs` - `apply_delta()` |
//! | INVARIANT-5 | Stale ids in a batch are dropped, never fatal | `domain/table.rs` - `apply_batch()` |
//! | INVARIANT-6 | A delta never overwrites an edit made after its snapshot | `domain/table.rs` - `apply_delta()` |
//!
//! ## Module Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/shipment_store.rs - ShipmentStore (RwLock, snapshots)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/table.rs  - ShipmentTable, CommitOutcome                │
//! │  domain/patch.rs  - ShipmentPatch (partial user edits)          │
//! │  error.rs         - StoreError                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{CommitOutcome, DeltaOutcome, ShipmentPatch, ShipmentTable};
pub use error::StoreError;
pub use service::ShipmentStore;
