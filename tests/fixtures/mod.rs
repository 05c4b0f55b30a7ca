// Test fixtures - reusable floor plans and bookings
// Shared across the integration and property test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use table_timeline::models::interval::{Interval, IntervalStatus};
use table_timeline::models::resource::{Resource, ResourceGroup};
use table_timeline::models::snapshot::TimelineSnapshot;

/// Friday 14 March 2025, the reference day for every fixture
pub fn service_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

/// Wall-clock time on the reference day
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    service_day().and_hms_opt(hour, minute, 0).unwrap()
}

pub fn booking(id: &str, resource: &str, hour: u32, minute: u32, minutes: i64) -> Interval {
    Interval::new(id, resource, at(hour, minute), minutes, 2).unwrap()
}

pub fn cancelled(id: &str, resource: &str, hour: u32, minute: u32, minutes: i64) -> Interval {
    let mut interval = booking(id, resource, hour, minute, minutes);
    interval.status = IntervalStatus::Cancelled;
    interval
}

/// Two sectors: "main" (T1 2-4, T2 2-6) then "terrace" (P1 4-10).
pub fn floor_plan() -> TimelineSnapshot {
    let mut snapshot = TimelineSnapshot::new(service_day());
    snapshot.groups = vec![
        ResourceGroup::new("main", "Main room", 0),
        ResourceGroup::new("terrace", "Terrace", 1),
    ];
    snapshot.resources = vec![
        Resource::new("T1", "main", 2, 4, 0),
        Resource::new("T2", "main", 2, 6, 1),
        Resource::new("P1", "terrace", 4, 10, 0),
    ];
    snapshot
}
