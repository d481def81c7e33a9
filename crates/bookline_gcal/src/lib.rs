// --- File: crates/bookline_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod boxed;
pub mod service;
