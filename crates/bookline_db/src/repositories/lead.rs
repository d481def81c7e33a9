//! Lead persistence contract.
//!
//! Bookings and call outcomes are written to two tables: `meetings` for
//! calls that resulted in an appointment, and `call_history` for every call
//! outcome, booked or not. Both writes are best-effort from the caller's
//! point of view; failures are logged and never fail a booking.

use crate::error::DbError;
use bookline_common::services::BoxFuture;

/// A booked meeting as stored in the `meetings` table.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    /// The requested start time exactly as the client sent it.
    pub start_time: String,
    pub goal: String,
    pub monthly_budget: i64,
    pub google_calendar_event_id: Option<String>,
    pub client_number: Option<String>,
}

/// A call outcome as stored in the `call_history` table.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub full_name: String,
    pub email: Option<String>,
    pub company_name: String,
    pub goal: String,
    pub monthly_budget: i64,
    pub resulted_in_meeting: bool,
    pub disqualification_reason: Option<String>,
    pub client_number: Option<String>,
    pub call_duration_seconds: i64,
}

/// Repository for lead data. Object-safe so the booking layer can hold it
/// behind `Arc<dyn LeadRepository>`.
pub trait LeadRepository: Send + Sync {
    /// Create the `meetings` and `call_history` tables if they do not exist.
    fn init_schema(&self) -> BoxFuture<'_, (), DbError>;

    /// Insert a booked meeting into the `meetings` table.
    fn save_booking(&self, record: BookingRecord) -> BoxFuture<'_, (), DbError>;

    /// Insert a call outcome into the `call_history` table.
    fn log_call(&self, record: CallRecord) -> BoxFuture<'_, (), DbError>;
}
