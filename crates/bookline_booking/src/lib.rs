// --- File: crates/bookline_booking/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;
