//! Repository implementations for lead data

pub mod lead;
pub mod lead_sql;

pub use lead::{BookingRecord, CallRecord, LeadRepository};
pub use lead_sql::SqlLeadRepository;
