// --- File: crates/bookline_engine/src/lib.rs ---
//! Pure availability-search engine.
//!
//! Given a calendar's busy intervals, the current time, and a business-hours
//! policy, the engine either judges one specific requested slot or enumerates
//! the next free slots on a fixed 15-minute grid. It performs no I/O and
//! keeps no state between calls.

// Declare modules within this crate
pub mod availability;
#[cfg(test)]
mod availability_proptest;
pub mod format;
pub mod interval;
pub mod policy;

pub use availability::{check_specific_slot, find_next_slots, AvailabilityVerdict, RejectionReason};
pub use format::human_readable_in_zone;
pub use interval::Interval;
pub use policy::BusinessHoursPolicy;
