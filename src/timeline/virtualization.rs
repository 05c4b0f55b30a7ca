//! Visible-range computation for the scrollable grid.
//!
//! Only the columns and rows intersecting the viewport, widened by a fixed
//! overscan margin, are handed to the renderer. `Virtualizer` coalesces scroll
//! bursts into at most one recomputation per frame and skips recomputation
//! until the scroll position has moved past a threshold.

use std::ops::RangeInclusive;

use egui::{Pos2, Rect, Vec2};

use super::layout::{GridLayout, GroupHeader, ResourceRow};
use super::view::TimelineView;
use crate::models::interval::Interval;
use crate::models::settings::TimelineSettings;

/// Scroll position and size of the visible area, in content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportWindow {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportWindow {
    pub fn new(scroll_x: f32, scroll_y: f32, width: f32, height: f32) -> Self {
        Self {
            scroll_x,
            scroll_y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.scroll_x, self.scroll_y),
            Vec2::new(self.width, self.height),
        )
    }

    fn scroll_delta(&self, other: &ViewportWindow) -> f32 {
        (self.scroll_x - other.scroll_x)
            .abs()
            .max((self.scroll_y - other.scroll_y).abs())
    }

    fn same_size(&self, other: &ViewportWindow) -> bool {
        self.width == other.width && self.height == other.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overscan {
    pub columns: i64,
    pub rows: usize,
}

/// Grid extent the viewport scrolls over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridExtent {
    pub slot_width: f32,
    pub row_height: f32,
    pub total_slots: i64,
    pub content_height: f32,
}

impl GridExtent {
    pub fn from_view(view: &TimelineView<'_>) -> Self {
        Self {
            slot_width: view.transform().slot_width(),
            row_height: view.layout().row_height(),
            total_slots: view.transform().total_slots(),
            content_height: view.layout().content_height(),
        }
    }
}

/// Columns `[start_col, end_col]` and pixel rows `[start_y, end_y]` to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub start_col: i64,
    pub end_col: i64,
    pub start_y: f32,
    pub end_y: f32,
}

/// Compute the render range for a viewport, widened by `overscan` and clamped
/// to `[0, total_slots]` columns and `[0, content_height]` pixels.
pub fn compute_visible_range(
    viewport: &ViewportWindow,
    extent: &GridExtent,
    overscan: Overscan,
) -> VisibleRange {
    let (start_col, end_col) = if extent.slot_width > 0.0 {
        let first = (viewport.scroll_x / extent.slot_width).floor() as i64;
        let last = ((viewport.scroll_x + viewport.width) / extent.slot_width).ceil() as i64;
        (first - overscan.columns, last + overscan.columns)
    } else {
        (0, 0)
    };

    let margin = overscan.rows as f32 * extent.row_height;
    let start_y = viewport.scroll_y - margin;
    let end_y = viewport.scroll_y + viewport.height + margin;

    let max_col = extent.total_slots.max(0);
    let max_y = extent.content_height.max(0.0);
    VisibleRange {
        start_col: start_col.clamp(0, max_col),
        end_col: end_col.clamp(0, max_col),
        start_y: start_y.clamp(0.0, max_y),
        end_y: end_y.clamp(0.0, max_y),
    }
}

impl VisibleRange {
    pub fn columns(&self) -> RangeInclusive<i64> {
        self.start_col..=self.end_col
    }

    /// Whether a band `[top, top + height)` intersects the pixel range.
    pub fn intersects_y(&self, top: f32, height: f32) -> bool {
        top < self.end_y && top + height > self.start_y
    }

    /// Whether slots `[start_slot, end_slot)` intersect the column range.
    pub fn intersects_columns(&self, start_slot: i64, end_slot: i64) -> bool {
        start_slot <= self.end_col && end_slot > self.start_col
    }

    pub fn visible_rows<'l>(&self, layout: &'l GridLayout) -> Vec<&'l ResourceRow> {
        let height = layout.row_height();
        layout
            .rows()
            .iter()
            .filter(|row| self.intersects_y(row.y, height))
            .collect()
    }

    pub fn visible_headers<'l>(&self, layout: &'l GridLayout) -> Vec<&'l GroupHeader> {
        let height = layout.metrics().header_height;
        layout
            .headers()
            .iter()
            .filter(|header| self.intersects_y(header.y, height))
            .collect()
    }

    /// Intervals on a laid-out row that intersect both ranges. Includes void
    /// intervals, which stay on screen for history.
    pub fn visible_intervals<'s>(&self, view: &TimelineView<'s>) -> Vec<&'s Interval> {
        let transform = view.transform();
        let row_height = view.layout().row_height();
        view.snapshot()
            .intervals
            .iter()
            .filter(|interval| {
                let Some(y) = view.layout().resource_offset(&interval.resource_id) else {
                    return false;
                };
                if !self.intersects_y(y, row_height) {
                    return false;
                }
                let start = transform.time_to_slot(interval.start);
                let end = transform.time_to_slot(interval.end - chrono::Duration::seconds(1)) + 1;
                self.intersects_columns(start, end)
            })
            .collect()
    }
}

/// Scroll-driven recomputation with per-frame coalescing.
///
/// `on_scroll` only records the latest viewport and reports whether a frame
/// needs to be scheduled; `on_frame` performs at most one recomputation.
#[derive(Debug, Clone)]
pub struct Virtualizer {
    overscan: Overscan,
    threshold: f32,
    latest: ViewportWindow,
    computed_at: Option<ViewportWindow>,
    range: Option<VisibleRange>,
    frame_pending: bool,
    force: bool,
}

impl Virtualizer {
    pub fn new(overscan: Overscan, threshold: f32) -> Self {
        Self {
            overscan,
            threshold,
            latest: ViewportWindow::default(),
            computed_at: None,
            range: None,
            frame_pending: false,
            force: true,
        }
    }

    pub fn from_settings(settings: &TimelineSettings) -> Self {
        Self::new(
            Overscan {
                columns: settings.overscan_columns,
                rows: settings.overscan_rows,
            },
            settings.scroll_threshold,
        )
    }

    /// Record a scroll position. Returns `true` when the caller should request
    /// an animation frame; further events before that frame return `false`.
    pub fn on_scroll(&mut self, viewport: ViewportWindow) -> bool {
        if !self.latest.same_size(&viewport) {
            self.force = true;
        }
        self.latest = viewport;
        !std::mem::replace(&mut self.frame_pending, true)
    }

    /// Record a viewport resize; the next frame always recomputes.
    pub fn on_resize(&mut self, viewport: ViewportWindow) -> bool {
        self.force = true;
        self.on_scroll(viewport)
    }

    /// Mark the range stale after a layout, zoom or data change.
    pub fn invalidate(&mut self) -> bool {
        self.force = true;
        !std::mem::replace(&mut self.frame_pending, true)
    }

    /// Run the pending recomputation, if any. Returns the new range when it
    /// was recomputed this frame.
    pub fn on_frame(&mut self, extent: &GridExtent) -> Option<VisibleRange> {
        if !std::mem::take(&mut self.frame_pending) {
            return None;
        }

        let moved_enough = match self.computed_at {
            Some(previous) => self.latest.scroll_delta(&previous) > self.threshold,
            None => true,
        };
        if !self.force && !moved_enough {
            return None;
        }

        let range = compute_visible_range(&self.latest, extent, self.overscan);
        log::debug!(
            "Visible range recomputed: cols {}..={}, y {:.0}..{:.0}",
            range.start_col,
            range.end_col,
            range.start_y,
            range.end_y
        );
        self.computed_at = Some(self.latest);
        self.range = Some(range);
        self.force = false;
        Some(range)
    }

    pub fn current(&self) -> Option<VisibleRange> {
        self.range
    }

    pub fn viewport(&self) -> ViewportWindow {
        self.latest
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::{GroupId, Resource, ResourceGroup};
    use crate::timeline::layout::{compute_layout, LayoutMetrics};
    use std::collections::HashSet;

    const EXTENT: GridExtent = GridExtent {
        slot_width: 40.0,
        row_height: 48.0,
        total_slots: 52,
        content_height: 2000.0,
    };

    const OVERSCAN: Overscan = Overscan {
        columns: 2,
        rows: 1,
    };

    #[test]
    fn test_range_includes_overscan() {
        let viewport = ViewportWindow::new(400.0, 500.0, 800.0, 300.0);
        let range = compute_visible_range(&viewport, &EXTENT, OVERSCAN);
        assert_eq!(range.start_col, 8);
        assert_eq!(range.end_col, 32);
        assert_eq!(range.start_y, 452.0);
        assert_eq!(range.end_y, 848.0);
    }

    #[test]
    fn test_range_clamped_at_origin_and_far_edge() {
        let range = compute_visible_range(&ViewportWindow::new(0.0, 0.0, 400.0, 300.0), &EXTENT, OVERSCAN);
        assert_eq!(range.start_col, 0);
        assert_eq!(range.start_y, 0.0);

        let range = compute_visible_range(
            &ViewportWindow::new(1900.0, 1900.0, 800.0, 600.0),
            &EXTENT,
            OVERSCAN,
        );
        assert_eq!(range.end_col, 52);
        assert_eq!(range.end_y, 2000.0);
    }

    #[test]
    fn test_zero_slot_width_degenerates() {
        let extent = GridExtent {
            slot_width: 0.0,
            ..EXTENT
        };
        let range = compute_visible_range(&ViewportWindow::new(0.0, 0.0, 100.0, 100.0), &extent, OVERSCAN);
        assert_eq!(range.columns(), 0..=0);
    }

    #[test]
    fn test_intersection_helpers() {
        let range = VisibleRange {
            start_col: 10,
            end_col: 20,
            start_y: 100.0,
            end_y: 300.0,
        };
        assert!(range.intersects_y(60.0, 48.0));
        assert!(!range.intersects_y(52.0, 48.0));
        assert!(!range.intersects_y(300.0, 48.0));
        assert!(range.intersects_columns(5, 11));
        assert!(!range.intersects_columns(5, 10));
        assert!(range.intersects_columns(20, 24));
        assert!(!range.intersects_columns(21, 24));
    }

    #[test]
    fn test_scrolled_range_filters_headers_and_rows() {
        let groups = vec![
            ResourceGroup::new("main", "Main room", 0),
            ResourceGroup::new("terrace", "Terrace", 1),
        ];
        let resources = vec![
            Resource::new("T1", "main", 2, 4, 0),
            Resource::new("T2", "main", 2, 4, 1),
            Resource::new("T3", "main", 2, 4, 2),
            Resource::new("P1", "terrace", 2, 6, 0),
        ];
        // main header 0..28, T1 28..76, T2 76..124, T3 124..172,
        // terrace header 172..200, P1 200..248.
        let layout = compute_layout(
            &groups,
            &resources,
            &HashSet::new(),
            LayoutMetrics {
                row_height: 48.0,
                header_height: 28.0,
            },
        );
        let extent = GridExtent {
            content_height: layout.content_height(),
            ..EXTENT
        };

        let range = compute_visible_range(
            &ViewportWindow::new(200.0, 130.0, 160.0, 60.0),
            &extent,
            Overscan { columns: 1, rows: 0 },
        );
        assert_eq!(range.columns(), 4..=10);

        let headers: Vec<&GroupId> = range
            .visible_headers(&layout)
            .into_iter()
            .map(|h| &h.group_id)
            .collect();
        assert_eq!(headers, vec![&GroupId::from("terrace")]);

        let rows: Vec<&str> = range
            .visible_rows(&layout)
            .into_iter()
            .map(|r| r.resource_id.0.as_str())
            .collect();
        assert_eq!(rows, vec!["T3"]);
    }

    #[test]
    fn test_scroll_burst_schedules_one_frame() {
        let mut virtualizer = Virtualizer::new(OVERSCAN, 24.0);
        assert!(virtualizer.on_resize(ViewportWindow::new(0.0, 0.0, 800.0, 600.0)));
        assert!(!virtualizer.on_scroll(ViewportWindow::new(0.0, 10.0, 800.0, 600.0)));
        assert!(!virtualizer.on_scroll(ViewportWindow::new(0.0, 30.0, 800.0, 600.0)));

        let range = virtualizer.on_frame(&EXTENT).unwrap();
        assert_eq!(range.start_y, 0.0);
        assert_eq!(virtualizer.viewport().scroll_y, 30.0);
        assert!(virtualizer.on_frame(&EXTENT).is_none());
    }

    #[test]
    fn test_small_scroll_below_threshold_is_skipped() {
        let mut virtualizer = Virtualizer::new(OVERSCAN, 24.0);
        virtualizer.on_resize(ViewportWindow::new(0.0, 200.0, 800.0, 600.0));
        let first = virtualizer.on_frame(&EXTENT).unwrap();

        assert!(virtualizer.on_scroll(ViewportWindow::new(0.0, 210.0, 800.0, 600.0)));
        assert!(virtualizer.on_frame(&EXTENT).is_none());
        assert_eq!(virtualizer.current(), Some(first));

        virtualizer.on_scroll(ViewportWindow::new(0.0, 230.0, 800.0, 600.0));
        let next = virtualizer.on_frame(&EXTENT).unwrap();
        assert_eq!(next.start_y, 230.0 - 48.0);
    }

    #[test]
    fn test_scroll_exactly_at_threshold_is_skipped() {
        let mut virtualizer = Virtualizer::new(OVERSCAN, 24.0);
        virtualizer.on_resize(ViewportWindow::new(0.0, 200.0, 800.0, 600.0));
        virtualizer.on_frame(&EXTENT);

        virtualizer.on_scroll(ViewportWindow::new(0.0, 224.0, 800.0, 600.0));
        assert!(virtualizer.on_frame(&EXTENT).is_none());

        virtualizer.on_scroll(ViewportWindow::new(0.0, 225.0, 800.0, 600.0));
        assert!(virtualizer.on_frame(&EXTENT).is_some());
    }

    #[test]
    fn test_resize_forces_recompute() {
        let mut virtualizer = Virtualizer::new(OVERSCAN, 24.0);
        virtualizer.on_resize(ViewportWindow::new(0.0, 0.0, 800.0, 600.0));
        virtualizer.on_frame(&EXTENT);

        virtualizer.on_resize(ViewportWindow::new(0.0, 0.0, 1200.0, 600.0));
        let range = virtualizer.on_frame(&EXTENT).unwrap();
        assert_eq!(range.end_col, 32);
    }

    #[test]
    fn test_from_settings_uses_configured_threshold() {
        let settings = TimelineSettings {
            scroll_threshold: 100.0,
            ..TimelineSettings::default()
        };
        let mut virtualizer = Virtualizer::from_settings(&settings);
        virtualizer.on_resize(ViewportWindow::new(0.0, 0.0, 800.0, 600.0));
        assert!(virtualizer.on_frame(&EXTENT).is_some());

        virtualizer.on_scroll(ViewportWindow::new(0.0, 80.0, 800.0, 600.0));
        assert!(virtualizer.on_frame(&EXTENT).is_none());
        assert!(!virtualizer.is_frame_pending());
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let mut virtualizer = Virtualizer::new(OVERSCAN, 24.0);
        virtualizer.on_resize(ViewportWindow::new(0.0, 0.0, 800.0, 600.0));
        virtualizer.on_frame(&EXTENT);

        assert!(virtualizer.invalidate());
        let taller = GridExtent {
            content_height: 400.0,
            ..EXTENT
        };
        assert_eq!(virtualizer.on_frame(&taller).unwrap().end_y, 400.0);
    }
}
