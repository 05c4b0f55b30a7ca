//! Vertical layout of sector headers and table rows.
//!
//! A single pass over groups in `sort_order` order. Each group emits a header
//! then, unless collapsed, one row per resource. Recomputed from scratch
//! whenever order, collapse state, zoom or the resource set change.

use std::collections::{HashMap, HashSet};

use crate::models::resource::{GroupId, Resource, ResourceGroup, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub row_height: f32,
    pub header_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupHeader {
    pub group_id: GroupId,
    pub y: f32,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRow {
    pub resource_id: ResourceId,
    pub group_id: GroupId,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    metrics: LayoutMetrics,
    headers: Vec<GroupHeader>,
    /// Rows in ascending `y` order
    rows: Vec<ResourceRow>,
    offsets: HashMap<ResourceId, f32>,
    content_height: f32,
}

/// Lay out `groups` and their `resources` top to bottom.
///
/// Resources whose group is missing from `groups` are skipped.
pub fn compute_layout(
    groups: &[ResourceGroup],
    resources: &[Resource],
    collapsed: &HashSet<GroupId>,
    metrics: LayoutMetrics,
) -> GridLayout {
    let mut ordered_groups: Vec<&ResourceGroup> = groups.iter().collect();
    ordered_groups.sort_by_key(|g| g.sort_order);

    let mut by_group: HashMap<&GroupId, Vec<&Resource>> = HashMap::new();
    for resource in resources {
        by_group.entry(&resource.group_id).or_default().push(resource);
    }

    let mut headers = Vec::with_capacity(ordered_groups.len());
    let mut rows = Vec::with_capacity(resources.len());
    let mut offsets = HashMap::with_capacity(resources.len());
    let mut cursor = 0.0_f32;

    for group in &ordered_groups {
        let is_collapsed = collapsed.contains(&group.id);
        headers.push(GroupHeader {
            group_id: group.id.clone(),
            y: cursor,
            collapsed: is_collapsed,
        });
        cursor += metrics.header_height;

        if is_collapsed {
            continue;
        }

        let Some(members) = by_group.get_mut(&group.id) else {
            continue;
        };
        members.sort_by_key(|r| r.sort_order);

        for resource in members.iter() {
            offsets.insert(resource.id.clone(), cursor);
            rows.push(ResourceRow {
                resource_id: resource.id.clone(),
                group_id: group.id.clone(),
                y: cursor,
            });
            cursor += metrics.row_height;
        }
    }

    let known: HashSet<&GroupId> = ordered_groups.iter().map(|g| &g.id).collect();
    for resource in resources {
        if !known.contains(&resource.group_id) {
            log::warn!(
                "Resource {} references unknown group {}; not laid out",
                resource.id,
                resource.group_id
            );
        }
    }

    log::debug!(
        "Layout: {} headers, {} rows, height {:.1}",
        headers.len(),
        rows.len(),
        cursor
    );

    GridLayout {
        metrics,
        headers,
        rows,
        offsets,
        content_height: cursor,
    }
}

impl GridLayout {
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn row_height(&self) -> f32 {
        self.metrics.row_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn headers(&self) -> &[GroupHeader] {
        &self.headers
    }

    pub fn rows(&self) -> &[ResourceRow] {
        &self.rows
    }

    /// Top of the row for `resource_id`, or `None` if hidden or unknown.
    pub fn resource_offset(&self, resource_id: &ResourceId) -> Option<f32> {
        self.offsets.get(resource_id).copied()
    }

    /// Resource whose row contains `y`. Headers and empty space return `None`.
    pub fn resource_at_y(&self, y: f32) -> Option<&ResourceId> {
        // Index of the last row starting at or above y.
        let idx = self.rows.partition_point(|row| row.y <= y);
        let row = self.rows.get(idx.checked_sub(1)?)?;
        (y < row.y + self.metrics.row_height).then_some(&row.resource_id)
    }

    /// Group header containing `y`, if any.
    pub fn header_at_y(&self, y: f32) -> Option<&GroupHeader> {
        let idx = self.headers.partition_point(|h| h.y <= y);
        let header = self.headers.get(idx.checked_sub(1)?)?;
        (y < header.y + self.metrics.header_height).then_some(header)
    }
}
