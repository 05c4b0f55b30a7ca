// Snapshot module
// Read-only view of the external store handed to the timeline each render

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::interval::{Interval, IntervalId};
use super::resource::{GroupId, Resource, ResourceGroup, ResourceId};

fn default_zoom() -> u32 {
    100
}

/// Everything the timeline reads from the store for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSnapshot {
    pub groups: Vec<ResourceGroup>,
    pub resources: Vec<Resource>,
    pub intervals: Vec<Interval>,
    #[serde(default)]
    pub collapsed_group_ids: HashSet<GroupId>,
    #[serde(default = "default_zoom")]
    pub zoom_percent: u32,
    pub reference_day: NaiveDate,
}

impl TimelineSnapshot {
    pub fn new(reference_day: NaiveDate) -> Self {
        Self {
            groups: Vec::new(),
            resources: Vec::new(),
            intervals: Vec::new(),
            collapsed_group_ids: HashSet::new(),
            zoom_percent: default_zoom(),
            reference_day,
        }
    }

    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    pub fn interval(&self, id: &IntervalId) -> Option<&Interval> {
        self.intervals.iter().find(|i| &i.id == id)
    }

    /// Return a copy with `group_id` toggled in the collapsed set.
    ///
    /// The collapsed set is treated as an immutable input to layout, so
    /// toggling yields a new set rather than mutating the current one.
    pub fn with_group_toggled(&self, group_id: &GroupId) -> HashSet<GroupId> {
        let mut collapsed = self.collapsed_group_ids.clone();
        if !collapsed.remove(group_id) {
            collapsed.insert(group_id.clone());
        }
        collapsed
    }
}
