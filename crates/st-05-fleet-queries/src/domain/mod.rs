//! # Domain Layer - Fleet Queries
//!
//! - `filter`: `FleetFilter`, sort keys and map bounds
//! - `selectors`: list views over a table
//! - `analytics`: `AnalyticsSummary`

pub mod analytics;
pub mod filter;
pub mod selectors;

pub use analytics::{
    AnalyticsSummary, DailyCount, DestinationCount, RevenueByPriority, StatusCounts,
};
pub use filter::{FleetFilter, MapBounds, SortBy, SortOrder};
pub use selectors::{active, by_status, delayed, filtered, sorted, visible, visible_in};
