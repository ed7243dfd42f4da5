//! Filter bar state, sort keys and the map viewport.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shared_types::{GeoPoint, Priority, Shipment, ShipmentStatus, Timestamp};

/// Dashboard filter state. Empty sets mean "no constraint".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetFilter {
    pub statuses: Vec<ShipmentStatus>,
    pub priorities: Vec<Priority>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `created_at`.
    pub created_to: Option<Timestamp>,
    pub search: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FleetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `status` to the set, or removes it if already present.
    pub fn toggle_status(&mut self, status: ShipmentStatus) {
        toggle(&mut self.statuses, status);
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        toggle(&mut self.priorities, priority);
    }

    pub fn set_created_range(&mut self, from: Option<Timestamp>, to: Option<Timestamp>) {
        self.created_from = from;
        self.created_to = to;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn set_sort(&mut self, sort_by: SortBy, sort_order: SortOrder) {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
    }

    /// Resets every filter. The sort order is kept.
    pub fn clear(&mut self) {
        self.statuses.clear();
        self.priorities.clear();
        self.created_from = None;
        self.created_to = None;
        self.search.clear();
    }

    /// Returns true if `shipment` passes every active constraint.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&shipment.status) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&shipment.priority) {
            return false;
        }
        let from = self.created_from.unwrap_or(0);
        let to = self.created_to.unwrap_or(Timestamp::MAX);
        if shipment.created_at < from || shipment.created_at > to {
            return false;
        }
        self.matches_search(shipment)
    }

    fn matches_search(&self, shipment: &Shipment) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            shipment.tracking_number.as_str(),
            shipment.customer.name.as_str(),
            shipment.destination.city.as_str(),
            shipment.origin.city.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

fn toggle<T: PartialEq>(set: &mut Vec<T>, value: T) {
    match set.iter().position(|v| *v == value) {
        Some(index) => {
            set.remove(index);
        }
        None => set.push(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Eta,
    Status,
    Priority,
    Customer,
    CreatedAt,
}

impl SortBy {
    /// Ascending comparison of two shipments under this key.
    pub fn compare(&self, a: &Shipment, b: &Shipment) -> Ordering {
        match self {
            Self::Eta => a.estimated_delivery.cmp(&b.estimated_delivery),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::Priority => a.priority.rank().cmp(&b.priority.rank()),
            Self::Customer => a.customer.name.cmp(&b.customer.name),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Visible map rectangle. Both corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl MapBounds {
    pub fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}
