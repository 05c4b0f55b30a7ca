// Settings module
// Tunables for the timeline grid, persisted as TOML

use serde::{Deserialize, Serialize};

use super::operating_window::OperatingWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Slot width in pixels at 100% zoom
    pub base_slot_width: f32,
    /// Resource row height in pixels at 100% zoom
    pub base_row_height: f32,
    pub header_height: f32,
    pub min_zoom: u32,
    pub max_zoom: u32,
    pub overscan_columns: i64,
    pub overscan_rows: usize,
    /// Pixel distance from a reservation's left/right edge that starts a resize
    pub edge_hit_margin: f32,
    /// Scroll distance in pixels before the visible range is recomputed
    pub scroll_threshold: f32,
    pub window: OperatingWindow,
}

impl TimelineSettings {
    pub fn clamp_zoom(&self, zoom_percent: u32) -> u32 {
        zoom_percent.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }

    /// Slot width for a zoom level, `base * zoom / 100`.
    pub fn slot_width(&self, zoom_percent: u32) -> f32 {
        self.base_slot_width * self.clamp_zoom(zoom_percent) as f32 / 100.0
    }

    pub fn row_height(&self, zoom_percent: u32) -> f32 {
        self.base_row_height * self.clamp_zoom(zoom_percent) as f32 / 100.0
    }
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            base_slot_width: 40.0,
            base_row_height: 48.0,
            header_height: 28.0,
            min_zoom: 50,
            max_zoom: 200,
            overscan_columns: 4,
            overscan_rows: 3,
            edge_hit_margin: 12.0,
            scroll_threshold: 24.0,
            window: OperatingWindow::default(),
        }
    }
}
