// Error module
// Validation errors raised by the timeline data model

use thiserror::Error;

/// Validation failure for reference data or a reservation.
///
/// These are only produced by explicit `validate*` calls. The interaction
/// layer never raises them: out-of-range input is clamped there instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("slot length of {0} minutes must be positive and divide 60")]
    InvalidSlotMinutes(u32),

    #[error("operating window {start}:00-{end}:00 is invalid (need start < end <= 48)")]
    InvalidWindow { start: u32, end: u32 },

    #[error("duration of {0} minutes is outside the allowed 30-360 minute range")]
    DurationOutOfBounds(i64),

    #[error("duration of {declared} minutes does not match start/end span of {actual} minutes")]
    DurationMismatch { declared: i64, actual: i64 },

    #[error("capacity range {min}-{max} is inverted")]
    InvertedCapacity { min: u32, max: u32 },

    #[error("party of {party_size} does not fit capacity {min}-{max}")]
    CapacityExceeded { party_size: u32, min: u32, max: u32 },

    #[error("{0} is required")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(
            ModelError::InvalidSlotMinutes(7).to_string(),
            "slot length of 7 minutes must be positive and divide 60"
        );
        assert_eq!(
            ModelError::CapacityExceeded { party_size: 9, min: 2, max: 4 }.to_string(),
            "party of 9 does not fit capacity 2-4"
        );
    }
}
