//! Dashboard analytics over a table snapshot.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Priority, Shipment, ShipmentStatus, Timestamp};
use st_02_shipment_store::ShipmentTable;

const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: u64 = 86_400_000;

/// Number of trailing days in `shipments_per_day`, today included.
pub const DAILY_WINDOW: usize = 7;
/// Length of `top_destinations`.
pub const TOP_DESTINATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_transit: usize,
    pub out_for_delivery: usize,
    pub delivered: usize,
    pub delayed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: ShipmentStatus) {
        let slot = match status {
            ShipmentStatus::Pending => &mut self.pending,
            ShipmentStatus::InTransit => &mut self.in_transit,
            ShipmentStatus::OutForDelivery => &mut self.out_for_delivery,
            ShipmentStatus::Delivered => &mut self.delivered,
            ShipmentStatus::Delayed => &mut self.delayed,
        };
        *slot += 1;
    }

    pub fn get(&self, status: ShipmentStatus) -> usize {
        match status {
            ShipmentStatus::Pending => self.pending,
            ShipmentStatus::InTransit => self.in_transit,
            ShipmentStatus::OutForDelivery => self.out_for_delivery,
            ShipmentStatus::Delivered => self.delivered,
            ShipmentStatus::Delayed => self.delayed,
        }
    }
}

/// Mock revenue: a flat per-kilogram rate for each service level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueByPriority {
    pub standard: f64,
    pub express: f64,
    pub overnight: f64,
}

impl RevenueByPriority {
    pub fn rate(priority: Priority) -> f64 {
        match priority {
            Priority::Standard => 10.0,
            Priority::Express => 25.0,
            Priority::Overnight => 50.0,
        }
    }

    fn record(&mut self, shipment: &Shipment) {
        let amount = Self::rate(shipment.priority) * shipment.package.weight;
        match shipment.priority {
            Priority::Standard => self.standard += amount,
            Priority::Express => self.express += amount,
            Priority::Overnight => self.overnight += amount,
        }
    }

    pub fn total(&self) -> f64 {
        self.standard + self.express + self.overnight
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
    /// `"City, ST"`.
    pub city: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_shipments: usize,
    pub status_counts: StatusCounts,
    /// Mean hours from creation to delivery, one decimal.
    pub average_delivery_hours: f64,
    /// Percentage of deliveries at or before their estimate, one decimal.
    pub on_time_rate: f64,
    pub delayed_shipments: usize,
    pub revenue_by_priority: RevenueByPriority,
    /// Oldest day first. Days are UTC calendar days.
    pub shipments_per_day: Vec<DailyCount>,
    pub top_destinations: Vec<DestinationCount>,
}

impl AnalyticsSummary {
    /// Summarizes `table` as seen at `now`.
    pub fn compute(table: &ShipmentTable, now: Timestamp) -> Self {
        let mut status_counts = StatusCounts::default();
        let mut revenue_by_priority = RevenueByPriority::default();
        for shipment in table.iter() {
            status_counts.record(shipment.status);
            revenue_by_priority.record(shipment);
        }

        let delivered: Vec<(Timestamp, &Shipment)> = table
            .with_status(ShipmentStatus::Delivered)
            .filter_map(|s| s.actual_delivery.map(|at| (at, s)))
            .collect();

        let (average_delivery_hours, on_time_rate) = if delivered.is_empty() {
            (0.0, 0.0)
        } else {
            let count = delivered.len() as f64;
            let total_ms: f64 = delivered
                .iter()
                .map(|(at, s)| *at as f64 - s.created_at as f64)
                .sum();
            let on_time = delivered
                .iter()
                .filter(|(at, s)| *at <= s.estimated_delivery)
                .count() as f64;
            (total_ms / count / MS_PER_HOUR, on_time / count * 100.0)
        };

        Self {
            total_shipments: table.len(),
            status_counts,
            average_delivery_hours: round_one(average_delivery_hours),
            on_time_rate: round_one(on_time_rate),
            delayed_shipments: status_counts.delayed,
            revenue_by_priority,
            shipments_per_day: shipments_per_day(table, now),
            top_destinations: top_destinations(table),
        }
    }
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn shipments_per_day(table: &ShipmentTable, now: Timestamp) -> Vec<DailyCount> {
    let today_start = now - now % MS_PER_DAY;
    let Some(today) = utc_date(today_start) else {
        return Vec::new();
    };

    (0..DAILY_WINDOW as u64)
        .rev()
        .filter_map(|days_ago| {
            let start = today_start.checked_sub(days_ago * MS_PER_DAY)?;
            let end = start + MS_PER_DAY;
            let count = table
                .iter()
                .filter(|s| s.created_at >= start && s.created_at < end)
                .count();
            let date = today - Duration::days(days_ago as i64);
            Some(DailyCount { date, count })
        })
        .collect()
}

fn utc_date(ms: Timestamp) -> Option<NaiveDate> {
    let ms = i64::try_from(ms).ok()?;
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|at| at.date_naive())
}

fn top_destinations(table: &ShipmentTable) -> Vec<DestinationCount> {
    let mut counts: Vec<DestinationCount> = Vec::new();
    for shipment in table.iter() {
        let city = shipment.destination.city_label();
        match counts.iter_mut().find(|c| c.city == city) {
            Some(entry) => entry.count += 1,
            None => counts.push(DestinationCount { city, count: 1 }),
        }
    }
    // Stable: ties keep first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_DESTINATIONS);
    counts
}
