// Interval module
// Reservation model: a party booked onto one table for a span of time

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::resource::{Resource, ResourceId};

/// Shortest bookable reservation, in minutes.
pub const MIN_DURATION_MINUTES: i64 = 30;
/// Longest bookable reservation, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 360;

/// Identifier of a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalId(pub String);

impl From<&str> for IntervalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for IntervalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Reservation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalStatus {
    Pending,
    #[default]
    Confirmed,
    Seated,
    Finished,
    NoShow,
    Cancelled,
}

impl IntervalStatus {
    /// Void statuses stay on the grid for history but never block a table.
    pub fn is_void(&self) -> bool {
        matches!(self, IntervalStatus::Cancelled)
    }
}

/// A reservation on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub id: IntervalId,
    pub resource_id: ResourceId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub party_size: u32,
    #[serde(default)]
    pub status: IntervalStatus,
    pub duration_minutes: i64,
}

impl Interval {
    /// Create a reservation from a start time and a duration.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use table_timeline::models::interval::Interval;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 14)
    ///     .unwrap()
    ///     .and_hms_opt(20, 0, 0)
    ///     .unwrap();
    /// let booking = Interval::new("R1", "T1", start, 90, 4).unwrap();
    /// assert_eq!(booking.end.format("%H:%M").to_string(), "21:30");
    /// ```
    pub fn new(
        id: impl Into<IntervalId>,
        resource_id: impl Into<ResourceId>,
        start: NaiveDateTime,
        duration_minutes: i64,
        party_size: u32,
    ) -> Result<Self, ModelError> {
        check_duration_bounds(duration_minutes)?;
        let interval = Self {
            id: id.into(),
            resource_id: resource_id.into(),
            start,
            end: start + Duration::minutes(duration_minutes),
            party_size,
            status: IntervalStatus::default(),
            duration_minutes,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Create a builder for constructing reservations field by field
    pub fn builder() -> IntervalBuilder {
        IntervalBuilder::new()
    }

    /// Check duration bounds and that `end - start` matches the declared duration.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_duration_bounds(self.duration_minutes)?;
        let actual = (self.end - self.start).num_minutes();
        if actual != self.duration_minutes {
            return Err(ModelError::DurationMismatch {
                declared: self.duration_minutes,
                actual,
            });
        }
        Ok(())
    }

    /// Check the party fits the resource it is (or would be) booked on.
    pub fn validate_capacity(&self, resource: &Resource) -> Result<(), ModelError> {
        if resource.fits(self.party_size) {
            Ok(())
        } else {
            Err(ModelError::CapacityExceeded {
                party_size: self.party_size,
                min: resource.capacity_min,
                max: resource.capacity_max,
            })
        }
    }

    /// Whether this reservation blocks its resource.
    pub fn is_active(&self) -> bool {
        !self.status.is_void()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

fn check_duration_bounds(minutes: i64) -> Result<(), ModelError> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(ModelError::DurationOutOfBounds(minutes))
    }
}

/// Builder for reservations
pub struct IntervalBuilder {
    id: Option<IntervalId>,
    resource_id: Option<ResourceId>,
    start: Option<NaiveDateTime>,
    duration_minutes: Option<i64>,
    party_size: u32,
    status: IntervalStatus,
}

impl IntervalBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            resource_id: None,
            start: None,
            duration_minutes: None,
            party_size: 2,
            status: IntervalStatus::default(),
        }
    }

    pub fn id(mut self, id: impl Into<IntervalId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn party_size(mut self, party_size: u32) -> Self {
        self.party_size = party_size;
        self
    }

    pub fn status(mut self, status: IntervalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Result<Interval, ModelError> {
        let id = self.id.ok_or(ModelError::MissingField("reservation id"))?;
        let resource_id = self.resource_id.ok_or(ModelError::MissingField("resource id"))?;
        let start = self.start.ok_or(ModelError::MissingField("start time"))?;
        let duration_minutes = self
            .duration_minutes
            .ok_or(ModelError::MissingField("duration"))?;

        let mut interval = Interval::new(id, resource_id, start, duration_minutes, self.party_size)?;
        interval.status = self.status;
        Ok(interval)
    }
}

impl Default for IntervalBuilder {
    fn default() -> Self {
        Self::new()
    }
}
