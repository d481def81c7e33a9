#[cfg(test)]
mod tests {
    use crate::availability::{find_next_slots, AvailabilityVerdict};
    use crate::interval::Interval;
    use crate::policy::BusinessHoursPolicy;
    use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
    use proptest::prelude::*;

    // Fixed reference instant so shrinking is deterministic: Monday
    // 2025-05-05 07:00 UTC (09:00 in Johannesburg).
    fn base_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 7, 0, 0).unwrap()
    }

    // Builds non-overlapping busy blocks starting a given number of
    // quarter-hours after `now`.
    fn build_busy(
        now: DateTime<Utc>,
        offsets_quarters: &[i64],
        duration_minutes: i64,
    ) -> Vec<Interval> {
        offsets_quarters
            .iter()
            .map(|q| {
                let start = now + Duration::minutes(q * 15);
                Interval::new(start, start + Duration::minutes(duration_minutes.max(15)))
            })
            .collect()
    }

    fn extract_slots(verdict: AvailabilityVerdict) -> Vec<Interval> {
        match verdict {
            AvailabilityVerdict::SuggestionsFound(slots) => slots,
            AvailabilityVerdict::NoSlotsFound => Vec::new(),
            other => panic!("Unexpected verdict from scan: {:?}", other),
        }
    }

    proptest! {
        // The scan never returns more slots than the policy allows
        #[test]
        fn scan_respects_suggestion_count(
            now_offset_minutes in 0..10_080i64, // anywhere in the first week
            busy_offsets in proptest::collection::vec(0..200i64, 0..6),
            busy_duration_minutes in 15..180i64,
            suggestion_count in 1..10usize,
        ) {
            let now = base_now() + Duration::minutes(now_offset_minutes);
            let busy = build_busy(now, &busy_offsets, busy_duration_minutes);
            let policy = BusinessHoursPolicy {
                suggestion_count,
                ..BusinessHoursPolicy::default()
            };

            let slots = extract_slots(find_next_slots(now, &busy, &policy));
            prop_assert!(slots.len() <= suggestion_count,
                "Got {} slots, policy allows at most {}",
                slots.len(), suggestion_count);
        }

        // Slots come back strictly ascending and all within the search window
        #[test]
        fn scan_is_ordered_and_windowed(
            now_offset_minutes in 0..10_080i64,
            busy_offsets in proptest::collection::vec(0..200i64, 0..6),
            busy_duration_minutes in 15..180i64,
        ) {
            let now = base_now() + Duration::minutes(now_offset_minutes);
            let busy = build_busy(now, &busy_offsets, busy_duration_minutes);
            let policy = BusinessHoursPolicy::default();

            let slots = extract_slots(find_next_slots(now, &busy, &policy));

            for pair in slots.windows(2) {
                prop_assert!(pair[0].start < pair[1].start,
                    "Slots out of order: {:?} then {:?}", pair[0], pair[1]);
            }
            for slot in &slots {
                prop_assert!(slot.start >= now + policy.lead_time,
                    "Slot {:?} violates the lead time", slot);
                prop_assert!(slot.start < now + policy.search_window,
                    "Slot {:?} starts past the search window", slot);
            }
        }

        // Every slot has the policy duration and starts inside business hours
        #[test]
        fn slots_have_fixed_duration_and_fit_business_hours(
            now_offset_minutes in 0..10_080i64,
            busy_offsets in proptest::collection::vec(0..200i64, 0..6),
            busy_duration_minutes in 15..180i64,
        ) {
            let now = base_now() + Duration::minutes(now_offset_minutes);
            let busy = build_busy(now, &busy_offsets, busy_duration_minutes);
            let policy = BusinessHoursPolicy::default();

            let slots = extract_slots(find_next_slots(now, &busy, &policy));

            for slot in &slots {
                prop_assert_eq!(slot.duration(), policy.slot_duration);

                let local = slot.start.with_timezone(&policy.zone);
                prop_assert!(policy.business_days.contains(&local.weekday()),
                    "Slot {:?} falls on {:?}", slot, local.weekday());
                prop_assert!(local.hour() >= policy.start_hour
                        && local.hour() < policy.end_hour,
                    "Slot {:?} starts at local hour {}", slot, local.hour());
            }
        }

        // No returned slot ever shares an instant with a busy block
        #[test]
        fn slots_never_overlap_busy_blocks(
            now_offset_minutes in 0..10_080i64,
            busy_offsets in proptest::collection::vec(0..200i64, 1..6),
            busy_duration_minutes in 15..180i64,
        ) {
            let now = base_now() + Duration::minutes(now_offset_minutes);
            let busy = build_busy(now, &busy_offsets, busy_duration_minutes);
            let policy = BusinessHoursPolicy::default();

            let slots = extract_slots(find_next_slots(now, &busy, &policy));

            for slot in &slots {
                for block in &busy {
                    prop_assert!(!slot.overlaps(block),
                        "Slot {:?} overlaps busy block {:?}", slot, block);
                }
            }
        }
    }
}
