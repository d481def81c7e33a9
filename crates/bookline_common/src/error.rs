// --- File: crates/bookline_common/src/error.rs ---

/// A trait for converting domain errors to HTTP status codes.
///
/// Each crate keeps its own thiserror enum; implementing this trait at the
/// HTTP boundary keeps the status mapping next to the error definition
/// instead of scattered through handlers.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}
