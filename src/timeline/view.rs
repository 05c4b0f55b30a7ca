//! Per-render view of a snapshot: transform, layout and pointer hit testing.

use egui::{Pos2, Rect, Vec2};

use super::layout::{compute_layout, GridLayout, LayoutMetrics};
use super::resize::{EdgeZones, ResizeEdge};
use super::transform::GridTransform;
use crate::models::interval::{Interval, IntervalId};
use crate::models::resource::{GroupId, ResourceId};
use crate::models::settings::TimelineSettings;
use crate::models::snapshot::TimelineSnapshot;

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    /// Free grid area on a resource row
    EmptyCell { resource_id: ResourceId, slot: i64 },
    /// Body of a reservation; dragging moves it
    IntervalBody(IntervalId),
    /// Edge of a reservation; dragging resizes it
    IntervalEdge(IntervalId, ResizeEdge),
    /// A sector header row
    GroupHeader(GroupId),
    /// Outside the grid content
    Outside,
}

/// Snapshot plus the geometry derived from it for one render.
#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    snapshot: &'a TimelineSnapshot,
    transform: GridTransform,
    layout: GridLayout,
    edge_margin: f32,
}

impl<'a> TimelineView<'a> {
    pub fn new(snapshot: &'a TimelineSnapshot, settings: &TimelineSettings) -> Self {
        let zoom = settings.clamp_zoom(snapshot.zoom_percent);
        let transform = GridTransform::new(
            settings.window,
            snapshot.reference_day,
            settings.slot_width(zoom),
        );
        let layout = compute_layout(
            &snapshot.groups,
            &snapshot.resources,
            &snapshot.collapsed_group_ids,
            LayoutMetrics {
                row_height: settings.row_height(zoom),
                header_height: settings.header_height,
            },
        );
        Self::from_parts(snapshot, transform, layout, settings.edge_hit_margin)
    }

    pub fn from_parts(
        snapshot: &'a TimelineSnapshot,
        transform: GridTransform,
        layout: GridLayout,
        edge_margin: f32,
    ) -> Self {
        Self {
            snapshot,
            transform,
            layout,
            edge_margin,
        }
    }

    pub fn snapshot(&self) -> &'a TimelineSnapshot {
        self.snapshot
    }

    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn intervals(&self) -> &'a [Interval] {
        &self.snapshot.intervals
    }

    pub fn content_size(&self) -> Vec2 {
        Vec2::new(self.transform.content_width(), self.layout.content_height())
    }

    /// Rect of a reservation in content pixels, if its row is laid out.
    pub fn interval_rect(&self, interval: &Interval) -> Option<Rect> {
        let top = self.layout.resource_offset(&interval.resource_id)?;
        let left = self.transform.time_to_pixel(interval.start);
        let right = self.transform.time_to_pixel(interval.end);
        Some(Rect::from_min_max(
            Pos2::new(left, top),
            Pos2::new(right, top + self.layout.row_height()),
        ))
    }

    /// Classify a pointer position in content coordinates.
    ///
    /// Void reservations are drawn but are not gesture targets, so the cell
    /// beneath them reads as empty.
    pub fn hit_test(&self, pos: Pos2) -> HitTarget {
        let size = self.content_size();
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= size.x || pos.y >= size.y {
            return HitTarget::Outside;
        }

        let Some(resource_id) = self.layout.resource_at_y(pos.y) else {
            return match self.layout.header_at_y(pos.y) {
                Some(header) => HitTarget::GroupHeader(header.group_id.clone()),
                None => HitTarget::Outside,
            };
        };

        // Later intervals draw on top, so test them first.
        for interval in self.snapshot.intervals.iter().rev() {
            if &interval.resource_id != resource_id || !interval.is_active() {
                continue;
            }
            let Some(rect) = self.interval_rect(interval) else {
                continue;
            };
            if !rect.contains(pos) {
                continue;
            }
            let zones = EdgeZones::for_interval(rect, self.edge_margin);
            return match zones.hit_test(pos) {
                Some(edge) => HitTarget::IntervalEdge(interval.id.clone(), edge),
                None => HitTarget::IntervalBody(interval.id.clone()),
            };
        }

        HitTarget::EmptyCell {
            resource_id: resource_id.clone(),
            slot: self.transform.pixel_to_slot(pos.x),
        }
    }
}
