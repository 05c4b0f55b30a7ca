// Operating window module
// Daily span over which the scheduling grid is defined

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Daily opening span, e.g. 11:00-24:00 in 15 minute slots.
///
/// `end_hour` may exceed 24 to express a window that runs past midnight
/// (26 means 02:00 the next morning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_minutes: u32,
}

impl OperatingWindow {
    /// Create a validated operating window.
    ///
    /// # Examples
    /// ```
    /// use table_timeline::models::operating_window::OperatingWindow;
    ///
    /// let window = OperatingWindow::new(11, 24, 15).unwrap();
    /// assert_eq!(window.total_slots(), 52);
    /// ```
    pub fn new(start_hour: u32, end_hour: u32, slot_minutes: u32) -> Result<Self, ModelError> {
        let window = Self {
            start_hour,
            end_hour,
            slot_minutes,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(ModelError::InvalidSlotMinutes(self.slot_minutes));
        }
        if self.start_hour >= self.end_hour || self.end_hour > 48 {
            return Err(ModelError::InvalidWindow {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }

    /// Length of the window in minutes.
    pub fn span_minutes(&self) -> i64 {
        (self.end_hour as i64 - self.start_hour as i64) * 60
    }

    /// Number of slots in the window. Constant for a given window.
    pub fn total_slots(&self) -> i64 {
        self.span_minutes() / self.slot_minutes.max(1) as i64
    }

    /// Whether the window closes after midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.end_hour > 24
    }

    /// Hours covered by the window, in grid order. Hours past midnight keep
    /// their raw value (25, 26, ...); use `format_hour_label` to render them.
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.start_hour..self.end_hour
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            start_hour: 11,
            end_hour: 24,
            slot_minutes: 15,
        }
    }
}
