//! # ST-05 Fleet Queries
//!
//! Pure read-side views over a `ShipmentTable` snapshot: the dashboard's
//! filter bar, sort order, map viewport and analytics panel. Nothing here
//! writes to the store.
//!
//! ```text
//! ShipmentStore::snapshot() ──→ filtered() ──→ sorted() ──→ visible_in(bounds)
//!                          └──→ AnalyticsSummary::compute(now)
//! ```

pub mod domain;

pub use domain::{
    active, by_status, delayed, filtered, sorted, visible, visible_in, AnalyticsSummary,
    DailyCount, DestinationCount, FleetFilter, MapBounds, RevenueByPriority, SortBy, SortOrder,
    StatusCounts,
};
