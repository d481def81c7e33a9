// --- File: crates/bookline_booking/src/routes.rs ---

use crate::auth::require_api_key;
use crate::handlers::{
    book_appointment_handler, get_availability_handler, log_call_handler, BookingState,
};
use axum::{middleware, routing::post, Router};
use bookline_common::services::{BoxedError, CalendarService};
use bookline_config::AppConfig;
use bookline_db::LeadRepository;
use std::sync::Arc;

/// Creates the router for the booking endpoints. Every route requires the
/// API key; the unauthenticated health check lives with the server.
pub fn routes(
    config: Arc<AppConfig>,
    calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    repository: Option<Arc<dyn LeadRepository>>,
) -> Router {
    let state = Arc::new(BookingState {
        config: config.clone(),
        calendar,
        repository,
    });

    Router::new()
        .route("/get-availability", post(get_availability_handler))
        .route("/book-appointment", post(book_appointment_handler))
        .route("/log-call", post(log_call_handler))
        .route_layer(middleware::from_fn_with_state(config, require_api_key))
        .with_state(state)
}
