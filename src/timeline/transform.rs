//! Coordinate transform between wall-clock time, slot index and pixel offset.
//!
//! Slots are counted from the start of the operating window on the reference
//! day. `time_to_slot` floors, so `slot_to_time(time_to_slot(t))` snaps `t`
//! down to its slot boundary; the pair only round-trips for aligned times.
//! Drag snapping depends on that.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::operating_window::OperatingWindow;
use crate::utils::date::at_hour;

/// Pixel offset of the nearest slot boundary.
pub fn pixel_to_slot(px: f32, slot_width: f32) -> i64 {
    if slot_width <= 0.0 {
        return 0;
    }
    (px / slot_width).round() as i64
}

pub fn slot_to_pixel(slot: i64, slot_width: f32) -> f32 {
    slot as f32 * slot_width
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    window: OperatingWindow,
    reference_day: NaiveDate,
    slot_width: f32,
}

impl GridTransform {
    pub fn new(window: OperatingWindow, reference_day: NaiveDate, slot_width: f32) -> Self {
        Self {
            window,
            reference_day,
            slot_width,
        }
    }

    pub fn window(&self) -> OperatingWindow {
        self.window
    }

    pub fn reference_day(&self) -> NaiveDate {
        self.reference_day
    }

    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    pub fn slot_minutes(&self) -> i64 {
        self.window.slot_minutes.max(1) as i64
    }

    pub fn total_slots(&self) -> i64 {
        self.window.total_slots()
    }

    /// Wall-clock start of the operating window on the reference day.
    pub fn window_start(&self) -> NaiveDateTime {
        at_hour(self.reference_day, self.window.start_hour)
    }

    pub fn window_end(&self) -> NaiveDateTime {
        at_hour(self.reference_day, self.window.end_hour)
    }

    /// Slot containing `t`. Times before the window yield negative slots.
    pub fn time_to_slot(&self, t: NaiveDateTime) -> i64 {
        let seconds = (t - self.window_start()).num_seconds();
        seconds.div_euclid(self.slot_minutes() * 60)
    }

    pub fn slot_to_time(&self, slot: i64) -> NaiveDateTime {
        self.window_start() + Duration::minutes(slot * self.slot_minutes())
    }

    /// Clamp a slot index into `[0, total_slots - 1]`.
    pub fn clamp_slot(&self, slot: i64) -> i64 {
        slot.clamp(0, (self.total_slots() - 1).max(0))
    }

    /// Clamp an exclusive end boundary into `[0, total_slots]`.
    pub fn clamp_boundary(&self, slot: i64) -> i64 {
        slot.clamp(0, self.total_slots().max(0))
    }

    pub fn pixel_to_slot(&self, px: f32) -> i64 {
        pixel_to_slot(px, self.slot_width)
    }

    pub fn slot_to_pixel(&self, slot: i64) -> f32 {
        slot_to_pixel(slot, self.slot_width)
    }

    /// Number of slots needed to cover `minutes`, rounded up.
    pub fn duration_to_slots(&self, minutes: i64) -> i64 {
        let slot = self.slot_minutes();
        (minutes + slot - 1).div_euclid(slot)
    }

    pub fn slots_to_minutes(&self, slots: i64) -> i64 {
        slots * self.slot_minutes()
    }

    /// Exact horizontal offset of `t`, not snapped to a slot boundary.
    pub fn time_to_pixel(&self, t: NaiveDateTime) -> f32 {
        let minutes = (t - self.window_start()).num_seconds() as f32 / 60.0;
        minutes / self.slot_minutes() as f32 * self.slot_width
    }

    /// Total grid width in pixels.
    pub fn content_width(&self) -> f32 {
        self.slot_to_pixel(self.total_slots())
    }
}
