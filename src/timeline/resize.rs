// Reservation edge zones
//
// A reservation block on the grid can be resized by grabbing its left
// (start time) or right (end time) edge. Everything else is the body,
// which moves the reservation.

use egui::{Pos2, Rect, Vec2};

/// Which edge of a reservation is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// Left edge - moves the start, keeps the end
    Start,
    /// Right edge - moves the end, keeps the start
    End,
}

impl ResizeEdge {
    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self {
            ResizeEdge::Start => egui::CursorIcon::ResizeWest,
            ResizeEdge::End => egui::CursorIcon::ResizeEast,
        }
    }
}

/// Default width of the edge hit zone in pixels
pub const EDGE_HIT_MARGIN: f32 = 12.0;

/// Hit zones at the left and right edges of a reservation rect
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeZones {
    pub start: Rect,
    pub end: Rect,
}

impl EdgeZones {
    /// Zones are `margin` wide, shrunk to a third of the block for narrow
    /// reservations so the middle third can still be grabbed to move it.
    pub fn for_interval(rect: Rect, margin: f32) -> Self {
        let zone_width = margin.min(rect.width() / 3.0).max(0.0);

        Self {
            start: Rect::from_min_size(rect.min, Vec2::new(zone_width, rect.height())),
            end: Rect::from_min_size(
                Pos2::new(rect.right() - zone_width, rect.top()),
                Vec2::new(zone_width, rect.height()),
            ),
        }
    }

    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeEdge> {
        if self.start.contains(pos) {
            Some(ResizeEdge::Start)
        } else if self.end.contains(pos) {
            Some(ResizeEdge::End)
        } else {
            None
        }
    }
}
