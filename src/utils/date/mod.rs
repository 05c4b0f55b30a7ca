// Date utility functions
// Wall-clock helpers for operating windows that may run past midnight

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Wall-clock time `hour` hours after the start of `day`.
///
/// Hours of 24 and above land on the following day, so an operating window
/// ending at 26 closes at 02:00 the next morning.
pub fn at_hour(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(chrono::NaiveTime::MIN) + Duration::hours(hour as i64)
}

/// Render a window hour as a clock label; hours past midnight wrap to 00, 01, ...
pub fn format_hour_label(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}

/// Whole minutes from `from` to `to`, negative when `to` is earlier.
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_minutes()
}

/// Whether `t` falls exactly on a boundary of `slot_minutes`-long slots
/// counted from `origin`.
pub fn is_slot_aligned(t: NaiveDateTime, origin: NaiveDateTime, slot_minutes: u32) -> bool {
    let seconds = (t - origin).num_seconds();
    t.nanosecond() == origin.nanosecond() && seconds.rem_euclid(slot_minutes as i64 * 60) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_at_hour_same_day() {
        assert_eq!(at_hour(day(), 11), day().and_hms_opt(11, 0, 0).unwrap());
    }

    #[test]
    fn test_at_hour_past_midnight() {
        let next = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(at_hour(day(), 24), next.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(at_hour(day(), 26), next.and_hms_opt(2, 0, 0).unwrap());
    }

    #[test]
    fn test_hour_labels_wrap() {
        assert_eq!(format_hour_label(11), "11:00");
        assert_eq!(format_hour_label(24), "00:00");
        assert_eq!(format_hour_label(25), "01:00");
    }

    #[test]
    fn test_minutes_between_is_signed() {
        let a = day().and_hms_opt(12, 0, 0).unwrap();
        let b = day().and_hms_opt(13, 30, 0).unwrap();
        assert_eq!(minutes_between(a, b), 90);
        assert_eq!(minutes_between(b, a), -90);
    }

    #[test]
    fn test_slot_alignment() {
        let origin = at_hour(day(), 11);
        assert!(is_slot_aligned(day().and_hms_opt(12, 45, 0).unwrap(), origin, 15));
        assert!(!is_slot_aligned(day().and_hms_opt(12, 50, 0).unwrap(), origin, 15));
        assert!(is_slot_aligned(day().and_hms_opt(10, 30, 0).unwrap(), origin, 15));
    }
}
