// --- File: crates/bookline_engine/src/interval.rs ---

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A half-open time range `[start, end)` in UTC.
///
/// Represents either a busy calendar block or a candidate appointment slot.
/// Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end, "interval start must precede end");
        Self { start, end }
    }

    /// Builds the interval `[start, start + duration)`.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    /// Open-interval overlap test: true iff the two ranges share any instant.
    /// Touching endpoints (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
