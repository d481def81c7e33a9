// --- File: crates/bookline_engine/src/policy.rs ---

use chrono::{DateTime, Datelike, Duration, Timelike, Weekday};
use chrono_tz::Tz;

/// Business-hour and slot-search configuration driving which candidate
/// instants are even considered.
///
/// Business hours are a local-wall-clock concept: a candidate is judged by
/// its weekday and hour in `zone`, never by its UTC components.
#[derive(Debug, Clone)]
pub struct BusinessHoursPolicy {
    /// First bookable local hour of the day (inclusive).
    pub start_hour: u32,
    /// Local hour at which bookings stop (exclusive, start-hour-only check).
    pub end_hour: u32,
    /// Days of the week on which bookings are permitted.
    pub business_days: Vec<Weekday>,
    /// The zone in which business hours are evaluated.
    pub zone: Tz,
    /// Fixed duration of every appointment.
    pub slot_duration: Duration,
    /// Grid step between candidate slots.
    pub step: Duration,
    /// Minimum lead time before the first suggested slot.
    pub lead_time: Duration,
    /// How far ahead the grid scan looks.
    pub search_window: Duration,
    /// Maximum number of suggestions returned by a scan.
    pub suggestion_count: usize,
}

impl Default for BusinessHoursPolicy {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 16,
            business_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            zone: chrono_tz::Africa::Johannesburg,
            slot_duration: Duration::minutes(60),
            step: Duration::minutes(15),
            lead_time: Duration::minutes(15),
            search_window: Duration::days(14),
            suggestion_count: 5,
        }
    }
}

impl BusinessHoursPolicy {
    /// Local-wall-clock business-hours test for a candidate start instant.
    ///
    /// Only the START hour is checked against `[start_hour, end_hour)`: a
    /// slot starting at `end_hour - 1` is accepted even though it runs past
    /// `end_hour`. This matches the deployed behavior and is deliberate.
    pub fn permits_start(&self, local_start: &DateTime<Tz>) -> bool {
        self.business_days.contains(&local_start.weekday())
            && local_start.hour() >= self.start_hour
            && local_start.hour() < self.end_hour
    }
}

/// Parses a short weekday name ("Mon".."Sun") as used in configuration.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        "Sun" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Africa::Johannesburg;

    #[test]
    fn weekday_names_parse() {
        assert_eq!(weekday_from_name("Mon"), Some(Weekday::Mon));
        assert_eq!(weekday_from_name("Sun"), Some(Weekday::Sun));
        assert_eq!(weekday_from_name("Monday"), None);
    }

    #[test]
    fn start_hour_boundary_is_inclusive_end_exclusive() {
        let policy = BusinessHoursPolicy::default();
        // Monday 2025-05-05 in Johannesburg
        let at_open = Johannesburg.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap();
        let last_hour = Johannesburg.with_ymd_and_hms(2025, 5, 5, 15, 45, 0).unwrap();
        let at_close = Johannesburg.with_ymd_and_hms(2025, 5, 5, 16, 0, 0).unwrap();
        assert!(policy.permits_start(&at_open));
        assert!(policy.permits_start(&last_hour));
        assert!(!policy.permits_start(&at_close));
    }

    #[test]
    fn weekend_is_rejected() {
        let policy = BusinessHoursPolicy::default();
        let saturday = Johannesburg
            .with_ymd_and_hms(2025, 5, 10, 10, 0, 0)
            .unwrap();
        assert!(!policy.permits_start(&saturday));
    }
}
