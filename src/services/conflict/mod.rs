// Conflict detection service
// Prevents double-booking a table and proposes free alternatives

use chrono::{Duration, NaiveDateTime};

use crate::models::interval::{Interval, IntervalId};
use crate::models::resource::{Resource, ResourceId};

/// Minute offsets tried, in this order, when looking for a nearby free start.
pub const ALTERNATIVE_START_OFFSETS: [i64; 4] = [-30, -15, 15, 30];

/// Half-open overlap test: `[a_start, a_end)` against `[b_start, b_end)`.
/// Touching endpoints do not overlap.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// A booking under consideration, not yet in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedInterval {
    pub resource_id: ResourceId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ProposedInterval {
    pub fn new(resource_id: impl Into<ResourceId>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            resource_id: resource_id.into(),
            start,
            end,
        }
    }

    pub fn from_duration(
        resource_id: impl Into<ResourceId>,
        start: NaiveDateTime,
        duration_minutes: i64,
    ) -> Self {
        Self::new(resource_id, start, start + Duration::minutes(duration_minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConflictReport {
    pub has_conflict: bool,
    /// Every overlapping reservation, in snapshot order
    pub conflicting_ids: Vec<IntervalId>,
}

/// Conflict queries over one snapshot of reservations.
pub struct ConflictService<'a> {
    intervals: &'a [Interval],
}

impl<'a> ConflictService<'a> {
    pub fn new(intervals: &'a [Interval]) -> Self {
        Self { intervals }
    }

    /// Find every active reservation on the same resource that overlaps
    /// `proposed`. `exclude` skips the reservation being edited.
    pub fn check(&self, proposed: &ProposedInterval, exclude: Option<&IntervalId>) -> ConflictReport {
        let conflicting_ids: Vec<IntervalId> = self
            .intervals
            .iter()
            .filter(|other| other.resource_id == proposed.resource_id)
            .filter(|other| other.is_active())
            .filter(|other| exclude != Some(&other.id))
            .filter(|other| overlaps(proposed.start, proposed.end, other.start, other.end))
            .map(|other| other.id.clone())
            .collect();

        ConflictReport {
            has_conflict: !conflicting_ids.is_empty(),
            conflicting_ids,
        }
    }

    /// Nearby start times on the same resource that are free for the same
    /// duration. Offsets are tried in `ALTERNATIVE_START_OFFSETS` order and
    /// the result keeps that order.
    pub fn find_alternative_start_times(
        &self,
        resource_id: &ResourceId,
        start: NaiveDateTime,
        duration_minutes: i64,
        exclude: Option<&IntervalId>,
    ) -> Vec<NaiveDateTime> {
        ALTERNATIVE_START_OFFSETS
            .iter()
            .map(|offset| start + Duration::minutes(*offset))
            .filter(|candidate| {
                let proposed =
                    ProposedInterval::from_duration(resource_id.clone(), *candidate, duration_minutes);
                !self.check(&proposed, exclude).has_conflict
            })
            .collect()
    }

    /// Alternatives from `find_alternative_resources` that are also free for
    /// `[start, end)`.
    pub fn find_free_resources<'r>(
        &self,
        resources: &'r [Resource],
        party_size: u32,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_resource: &ResourceId,
        exclude_interval: Option<&IntervalId>,
    ) -> Vec<&'r Resource> {
        find_alternative_resources(resources, party_size, exclude_resource)
            .into_iter()
            .filter(|resource| {
                let proposed = ProposedInterval::new(resource.id.clone(), start, end);
                !self.check(&proposed, exclude_interval).has_conflict
            })
            .collect()
    }

    /// Every pair of active reservations that overlap on the same resource.
    pub fn audit(&self) -> Vec<(IntervalId, IntervalId)> {
        let mut active: Vec<&Interval> = self.intervals.iter().filter(|i| i.is_active()).collect();
        active.sort_by(|a, b| {
            a.resource_id
                .cmp(&b.resource_id)
                .then(a.start.cmp(&b.start))
        });

        let mut pairs = Vec::new();
        for (idx, current) in active.iter().enumerate() {
            for other in &active[idx + 1..] {
                if other.resource_id != current.resource_id || other.start >= current.end {
                    break;
                }
                if overlaps(current.start, current.end, other.start, other.end) {
                    pairs.push((current.id.clone(), other.id.clone()));
                }
            }
        }
        pairs
    }
}

/// Resources other than `exclude` that can seat `party_size`, smallest
/// sufficient `capacity_max` first.
pub fn find_alternative_resources<'r>(
    resources: &'r [Resource],
    party_size: u32,
    exclude: &ResourceId,
) -> Vec<&'r Resource> {
    let mut candidates: Vec<&Resource> = resources
        .iter()
        .filter(|r| &r.id != exclude && r.fits(party_size))
        .collect();
    candidates.sort_by_key(|r| r.capacity_max);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interval::IntervalStatus;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn booking(id: &str, resource: &str, hour: u32, minute: u32, minutes: i64) -> Interval {
        Interval::new(id, resource, at(hour, minute), minutes, 2).unwrap()
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let intervals = vec![booking("R1", "T1", 12, 0, 60)];
        let service = ConflictService::new(&intervals);
        let report = service.check(&ProposedInterval::new("T1", at(13, 0), at(14, 0)), None);
        assert!(!report.has_conflict);

        let report = service.check(&ProposedInterval::new("T1", at(11, 0), at(12, 0)), None);
        assert!(!report.has_conflict);
    }

    #[test]
    fn test_overlap_reports_every_id() {
        let intervals = vec![
            booking("R1", "T1", 12, 0, 60),
            booking("R2", "T1", 13, 0, 60),
            booking("R3", "T2", 12, 0, 120),
        ];
        let service = ConflictService::new(&intervals);
        let report = service.check(&ProposedInterval::new("T1", at(12, 30), at(13, 30)), None);
        assert_eq!(
            report,
            ConflictReport {
                has_conflict: true,
                conflicting_ids: vec!["R1".into(), "R2".into()],
            }
        );
    }

    #[test]
    fn test_conflicting_move_is_reported() {
        let intervals = vec![booking("R1", "T1", 13, 0, 120), booking("R2", "T2", 12, 30, 90)];
        let service = ConflictService::new(&intervals);
        let report = service.check(
            &ProposedInterval::new("T1", at(12, 30), at(14, 0)),
            Some(&"R2".into()),
        );
        assert!(report.has_conflict);
        assert!(report.conflicting_ids.contains(&"R1".into()));
    }

    #[test]
    fn test_cancelled_and_excluded_are_ignored() {
        let mut cancelled = booking("R1", "T1", 12, 0, 60);
        cancelled.status = IntervalStatus::Cancelled;
        let intervals = vec![cancelled, booking("R2", "T1", 12, 0, 60)];
        let service = ConflictService::new(&intervals);

        let proposed = ProposedInterval::new("T1", at(12, 0), at(13, 0));
        assert_eq!(
            service.check(&proposed, None).conflicting_ids,
            vec![IntervalId::from("R2")]
        );
        assert!(!service.check(&proposed, Some(&"R2".into())).has_conflict);
    }

    #[test]
    fn test_alternative_resources_sorted_by_capacity() {
        let resources = vec![
            Resource::new("T10", "main", 2, 10, 0),
            Resource::new("T4", "main", 2, 4, 1),
            Resource::new("T6", "main", 2, 6, 2),
            Resource::new("T8big", "main", 6, 8, 3),
        ];
        let ids: Vec<&str> = find_alternative_resources(&resources, 4, &"T4".into())
            .iter()
            .map(|r| r.id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["T6", "T10"]);
    }

    #[test]
    fn test_alternative_start_times_keep_offset_order() {
        // R1 blocks 12:00-13:00; proposing 12:45-13:45 conflicts.
        let intervals = vec![booking("R1", "T1", 12, 0, 60), booking("R2", "T1", 14, 0, 60)];
        let service = ConflictService::new(&intervals);
        let times = service.find_alternative_start_times(&"T1".into(), at(12, 45), 60, None);
        // -30 -> 12:15 conflicts with R1, -15 -> 12:30 conflicts,
        // +15 -> 13:00 fits, +30 -> 13:15 runs into R2.
        assert_eq!(times, vec![at(13, 0)]);
    }

    #[test]
    fn test_alternative_start_times_all_free() {
        let service = ConflictService::new(&[]);
        let times = service.find_alternative_start_times(&"T1".into(), at(20, 0), 90, None);
        assert_eq!(times, vec![at(19, 30), at(19, 45), at(20, 15), at(20, 30)]);
    }

    #[test]
    fn test_free_resources_filters_busy_tables() {
        let resources = vec![
            Resource::new("T4", "main", 2, 4, 0),
            Resource::new("T6", "main", 2, 6, 1),
            Resource::new("T10", "main", 2, 10, 2),
        ];
        let intervals = vec![booking("R1", "T6", 12, 0, 90)];
        let service = ConflictService::new(&intervals);
        let free: Vec<&str> = service
            .find_free_resources(&resources, 4, at(12, 30), at(13, 30), &"T4".into(), None)
            .iter()
            .map(|r| r.id.0.as_str())
            .collect();
        assert_eq!(free, vec!["T10"]);
    }

    #[test]
    fn test_audit_finds_overlapping_pairs() {
        let mut cancelled = booking("R4", "T1", 12, 0, 240);
        cancelled.status = IntervalStatus::Cancelled;
        let intervals = vec![
            booking("R1", "T1", 12, 0, 90),
            booking("R2", "T1", 13, 0, 60),
            booking("R3", "T1", 14, 0, 60),
            booking("R5", "T2", 12, 0, 60),
            cancelled,
        ];
        let service = ConflictService::new(&intervals);
        assert_eq!(
            service.audit(),
            vec![(IntervalId::from("R1"), IntervalId::from("R2"))]
        );
    }
}
