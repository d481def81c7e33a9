// --- File: crates/bookline_engine/src/format.rs ---

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Renders a UTC instant as a spoken-friendly local time in the given zone,
/// e.g. "Monday, May 05 at 1:15 PM".
pub fn human_readable_in_zone(instant: DateTime<Utc>, zone: &Tz) -> String {
    instant
        .with_timezone(zone)
        .format("%A, %B %d at %-I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Africa::Johannesburg;

    #[test]
    fn formats_in_local_zone() {
        // 11:15 UTC is 13:15 in Johannesburg (UTC+2, no DST)
        let instant = Utc.with_ymd_and_hms(2025, 5, 5, 11, 15, 0).unwrap();
        assert_eq!(
            human_readable_in_zone(instant, &Johannesburg),
            "Monday, May 05 at 1:15 PM"
        );
    }

    #[test]
    fn formats_morning_without_leading_zero_hour() {
        let instant = Utc.with_ymd_and_hms(2025, 5, 6, 7, 0, 0).unwrap();
        assert_eq!(
            human_readable_in_zone(instant, &Johannesburg),
            "Tuesday, May 06 at 9:00 AM"
        );
    }
}
