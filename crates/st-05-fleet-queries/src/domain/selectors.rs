//! List views over a table snapshot.
//!
//! Every selector borrows from the table and preserves its id-list order
//! unless it sorts.

use shared_types::{Shipment, ShipmentStatus};
use st_02_shipment_store::ShipmentTable;

use super::filter::{FleetFilter, MapBounds};

/// Shipments passing `filter`, in table order.
pub fn filtered<'a>(table: &'a ShipmentTable, filter: &FleetFilter) -> Vec<&'a Shipment> {
    table.iter().filter(|s| filter.matches(s)).collect()
}

/// Filtered shipments ordered by the filter's sort key. Ties keep table order.
pub fn sorted<'a>(table: &'a ShipmentTable, filter: &FleetFilter) -> Vec<&'a Shipment> {
    let mut shipments = filtered(table, filter);
    shipments.sort_by(|a, b| filter.sort_order.apply(filter.sort_by.compare(a, b)));
    shipments
}

/// Shipments whose current location lies inside `bounds`.
pub fn visible_in<'a>(table: &'a ShipmentTable, bounds: &MapBounds) -> Vec<&'a Shipment> {
    table
        .iter()
        .filter(|s| bounds.contains(s.current_location.point()))
        .collect()
}

/// Sorted shipments, narrowed to the viewport when one is known.
pub fn visible<'a>(
    table: &'a ShipmentTable,
    filter: &FleetFilter,
    bounds: Option<&MapBounds>,
) -> Vec<&'a Shipment> {
    let shipments = sorted(table, filter);
    match bounds {
        Some(bounds) => shipments
            .into_iter()
            .filter(|s| bounds.contains(s.current_location.point()))
            .collect(),
        None => shipments,
    }
}

pub fn by_status(table: &ShipmentTable, status: ShipmentStatus) -> Vec<&Shipment> {
    table.with_status(status).collect()
}

/// Everything not yet delivered, `Pending` and `Delayed` included.
pub fn active(table: &ShipmentTable) -> Vec<&Shipment> {
    table
        .iter()
        .filter(|s| s.status != ShipmentStatus::Delivered)
        .collect()
}

pub fn delayed(table: &ShipmentTable) -> Vec<&Shipment> {
    by_status(table, ShipmentStatus::Delayed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{SortBy, SortOrder};
    use shared_types::{Customer, GeoPoint, Location, Priority};

    fn shipment(id: &str, status: ShipmentStatus, lat: f64, lng: f64) -> Shipment {
        Shipment::new(
            id,
            format!("1Z{id}"),
            status,
            Location::new(lat, lng, "1 Dock Rd", "Origin", "OR", "00000"),
            Location::new(0.0, 0.0, "2 End St", "Terminus", "TM", "11111"),
            0,
        )
    }

    fn ids(shipments: &[&Shipment]) -> Vec<String> {
        shipments.iter().map(|s| s.id.to_string()).collect()
    }

    fn fleet() -> ShipmentTable {
        ShipmentTable::from_shipments(vec![
            shipment("a", ShipmentStatus::InTransit, 40.0, -100.0)
                .with_priority(Priority::Express)
                .with_estimated_delivery(300),
            shipment("b", ShipmentStatus::Delivered, 10.0, 10.0)
                .with_priority(Priority::Overnight)
                .with_estimated_delivery(100),
            shipment("c", ShipmentStatus::Delayed, 35.0, -90.0).with_estimated_delivery(200),
            shipment("d", ShipmentStatus::Pending, 41.0, -95.0)
                .with_priority(Priority::Overnight)
                .with_estimated_delivery(300),
        ])
    }

    #[test]
    fn test_filtered_keeps_table_order() {
        let table = fleet();
        let mut filter = FleetFilter::new();
        filter.toggle_priority(Priority::Overnight);

        assert_eq!(ids(&filtered(&table, &filter)), vec!["b", "d"]);
    }

    #[test]
    fn test_sort_by_eta_is_stable() {
        let table = fleet();
        let filter = FleetFilter::new();
        assert_eq!(ids(&sorted(&table, &filter)), vec!["b", "c", "a", "d"]);

        let mut desc = FleetFilter::new();
        desc.set_sort(SortBy::Eta, SortOrder::Desc);
        assert_eq!(ids(&sorted(&table, &desc)), vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn test_sort_by_priority_rank() {
        let table = fleet();
        let mut filter = FleetFilter::new();
        filter.set_sort(SortBy::Priority, SortOrder::Asc);

        assert_eq!(ids(&sorted(&table, &filter)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_status_name() {
        let table = fleet();
        let mut filter = FleetFilter::new();
        filter.set_sort(SortBy::Status, SortOrder::Asc);

        // delayed < delivered < in_transit < pending
        assert_eq!(ids(&sorted(&table, &filter)), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_sort_by_customer() {
        let named = |id: &str, name: &str| {
            shipment(id, ShipmentStatus::InTransit, 0.0, 0.0).with_customer(Customer {
                name: name.into(),
                ..Customer::default()
            })
        };
        let table = ShipmentTable::from_shipments(vec![
            named("x", "Zed"),
            named("y", "Amy"),
            named("z", "Max"),
        ]);
        let mut filter = FleetFilter::new();
        filter.set_sort(SortBy::Customer, SortOrder::Asc);

        assert_eq!(ids(&sorted(&table, &filter)), vec!["y", "z", "x"]);
    }

    #[test]
    fn test_visible_without_bounds_returns_all() {
        let table = fleet();
        assert_eq!(visible(&table, &FleetFilter::new(), None).len(), 4);
    }

    #[test]
    fn test_visible_in_bounds() {
        let table = fleet();
        let bounds = MapBounds::new(GeoPoint::new(30.0, -110.0), GeoPoint::new(45.0, -80.0));

        assert_eq!(ids(&visible_in(&table, &bounds)), vec!["a", "c", "d"]);
        assert_eq!(
            ids(&visible(&table, &FleetFilter::new(), Some(&bounds))),
            vec!["c", "a", "d"]
        );
    }

    #[test]
    fn test_status_views() {
        let table = fleet();
        assert_eq!(ids(&by_status(&table, ShipmentStatus::InTransit)), vec!["a"]);
        assert_eq!(ids(&active(&table)), vec!["a", "c", "d"]);
        assert_eq!(ids(&delayed(&table)), vec!["c"]);
    }
}
