// --- File: crates/bookline_engine/src/availability.rs ---
//! The two entry modes of the engine: judge one requested slot, or enumerate
//! the next free slots on the grid.

use crate::interval::Interval;
use crate::policy::BusinessHoursPolicy;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

/// Why a requested instant was rejected before any busy-interval comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InPast,
    OutsideBusinessHours,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InPast => write!(f, "in the past"),
            RejectionReason::OutsideBusinessHours => write!(f, "outside business hours"),
        }
    }
}

/// The outcome of an availability computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityVerdict {
    /// The requested instant is free.
    SpecificSlotAvailable(DateTime<Utc>),
    /// The requested instant collides with a busy interval; `suggestions`
    /// holds the fallback grid-scan results (possibly empty).
    SpecificSlotUnavailable { suggestions: Vec<Interval> },
    /// Grid-scan results for an open-ended availability query.
    SuggestionsFound(Vec<Interval>),
    /// The grid scan found nothing inside the search window.
    NoSlotsFound,
    /// The requested instant never reached the busy-interval comparison.
    PastOrOutOfHours(RejectionReason),
}

/// Judges one specific requested start instant.
///
/// `requested_start` must already be normalized to UTC; business hours are
/// evaluated at the policy zone's local wall clock. `busy_intervals` should
/// cover at least `[now, now + search_window)` plus the requested slot so
/// the fallback scan sees the same data as the specific-slot test.
pub fn check_specific_slot(
    requested_start: DateTime<Utc>,
    busy_intervals: &[Interval],
    now: DateTime<Utc>,
    policy: &BusinessHoursPolicy,
) -> AvailabilityVerdict {
    // Strict less-than: a slot starting exactly now is accepted.
    if requested_start < now {
        return AvailabilityVerdict::PastOrOutOfHours(RejectionReason::InPast);
    }

    let local_start = requested_start.with_timezone(&policy.zone);
    if !policy.permits_start(&local_start) {
        return AvailabilityVerdict::PastOrOutOfHours(RejectionReason::OutsideBusinessHours);
    }

    let candidate = Interval::starting_at(requested_start, policy.slot_duration);
    if busy_intervals.iter().any(|busy| candidate.overlaps(busy)) {
        debug!(
            requested = %requested_start,
            "Requested slot collides with a busy interval, running fallback scan"
        );
        let suggestions = scan_grid(now, busy_intervals, policy);
        AvailabilityVerdict::SpecificSlotUnavailable { suggestions }
    } else {
        AvailabilityVerdict::SpecificSlotAvailable(requested_start)
    }
}

/// Enumerates the next free slots on the fixed grid.
pub fn find_next_slots(
    now: DateTime<Utc>,
    busy_intervals: &[Interval],
    policy: &BusinessHoursPolicy,
) -> AvailabilityVerdict {
    let slots = scan_grid(now, busy_intervals, policy);
    if slots.is_empty() {
        AvailabilityVerdict::NoSlotsFound
    } else {
        AvailabilityVerdict::SuggestionsFound(slots)
    }
}

/// Fixed-grid forward scan.
///
/// The cursor starts a lead time after `now` and advances by `step`
/// unconditionally, so the accepted slots are exactly the first qualifying
/// grid points in ascending order. O(window / step * busy_count); fast enough
/// for a 14-day window at 15-minute steps.
fn scan_grid(
    now: DateTime<Utc>,
    busy_intervals: &[Interval],
    policy: &BusinessHoursPolicy,
) -> Vec<Interval> {
    let mut cursor = now + policy.lead_time;
    let window_end = now + policy.search_window;

    let mut slots = Vec::new();
    while slots.len() < policy.suggestion_count && cursor < window_end {
        let local_start = cursor.with_timezone(&policy.zone);
        if policy.permits_start(&local_start) {
            let candidate = Interval::starting_at(cursor, policy.slot_duration);
            if !busy_intervals.iter().any(|busy| candidate.overlaps(busy)) {
                slots.push(candidate);
            }
        }
        cursor += policy.step;
    }
    slots
}
