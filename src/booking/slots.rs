//! Time-slot calculator

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Generate every bookable time point on `date` from `start_hour:00`
/// inclusive up to `end_hour:00` exclusive, stepping by `interval_minutes`.
///
/// Deterministic and pure. Returns an empty sequence when
/// `start_hour >= end_hour` or the hours fall outside a calendar day.
pub fn generate_slots(
    date: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
) -> Vec<NaiveDateTime> {
    if interval_minutes == 0 || start_hour >= end_hour || end_hour > 24 {
        return Vec::new();
    }
    let Some(start) = NaiveTime::from_hms_opt(start_hour, 0, 0) else {
        return Vec::new();
    };

    // The exclusive bound is an offset from midnight, not a clock time,
    // so a midnight close (end_hour = 24) yields the full day
    let end = date.and_time(NaiveTime::MIN) + Duration::hours(end_hour as i64);
    let step = Duration::minutes(interval_minutes as i64);

    let mut slots = Vec::new();
    let mut current = date.and_time(start);
    while current < end {
        slots.push(current);
        current += step;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_full_working_day() {
        let slots = generate_slots(date(), 9, 18, 30);
        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0], date().and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slots[17], date().and_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn test_strictly_increasing() {
        let slots = generate_slots(date(), 9, 18, 30);
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_count_formula() {
        // (end - start) * 60 / interval
        for (start, end) in [(9, 18), (8, 12), (0, 24)] {
            let slots = generate_slots(date(), start, end, 30);
            assert_eq!(slots.len() as u32, (end - start) * 2);
        }
    }

    #[test]
    fn test_midnight_close_covers_whole_day() {
        let slots = generate_slots(date(), 0, 24, 30);
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[0], date().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(slots[47], date().and_hms_opt(23, 30, 0).unwrap());
        assert!(slots.iter().all(|s| s.date() == date()));
    }

    #[test]
    fn test_empty_when_start_not_before_end() {
        assert!(generate_slots(date(), 18, 9, 30).is_empty());
        assert!(generate_slots(date(), 9, 9, 30).is_empty());
    }

    #[test]
    fn test_grid_minutes() {
        let slots = generate_slots(date(), 9, 18, 30);
        assert!(slots.iter().all(|s| s.minute() == 0 || s.minute() == 30));
        assert!(slots.iter().all(|s| s.second() == 0));
    }

    #[test]
    fn test_hourly_interval() {
        let slots = generate_slots(date(), 9, 12, 60);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.minute() == 0));
    }

    #[test]
    fn test_invalid_hours_yield_empty() {
        assert!(generate_slots(date(), 9, 25, 30).is_empty());
    }
}
