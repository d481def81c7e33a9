//! Database integration for Bookline
//!
//! Provides a database-agnostic client built on SQLx, with SQLite as the
//! default backend and PostgreSQL/MySQL behind feature flags, plus the lead
//! repositories the booking flow writes to.

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::{BookingRecord, CallRecord, LeadRepository, SqlLeadRepository};
