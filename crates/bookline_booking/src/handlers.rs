// File: crates/bookline_booking/src/handlers.rs

use crate::logic::{book_appointment, get_availability, log_call, BookingError};
use crate::models::{
    AvailabilityRequest, AvailabilityResponse, BookingRequest, BookingResponse, CallLogRequest,
};
use axum::{extract::State, http::StatusCode, response::Json};
use bookline_common::services::{BoxedError, CalendarService};
use bookline_common::HttpStatusCode;
use bookline_config::AppConfig;
use bookline_db::LeadRepository;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

/// Error payload shared with the auth middleware: `{"error": <message>}`.
type ErrorResponse = (StatusCode, Json<Value>);

// Shared state for the booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    /// Absent when the database feature is disabled at runtime.
    pub repository: Option<Arc<dyn LeadRepository>>,
}

impl BookingState {
    fn calendar_id(&self) -> Result<&str, ErrorResponse> {
        self.config
            .gcal
            .as_ref()
            .and_then(|gcal| gcal.calendar_id.as_deref())
            .ok_or_else(|| {
                error!("Calendar ID missing from configuration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Server configuration error: calendar ID missing."})),
                )
            })
    }
}

fn error_response(err: BookingError) -> ErrorResponse {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("Booking request failed: {}", err);
    }
    (status, Json(json!({"error": err.to_string()})))
}

/// Handler for `POST /get-availability`. The body is optional; without a
/// `start_time` the response lists the next open slots.
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<BookingState>>,
    body: Option<Json<AvailabilityRequest>>,
) -> Result<Json<AvailabilityResponse>, ErrorResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let calendar_id = state.calendar_id()?;
    let policy = crate::logic::policy_from_config(state.config.booking.as_ref());

    get_availability(&state.calendar, calendar_id, &policy, &request, Utc::now())
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handler for `POST /book-appointment`.
#[axum::debug_handler]
pub async fn book_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ErrorResponse> {
    let calendar_id = state.calendar_id()?;
    let policy = crate::logic::policy_from_config(state.config.booking.as_ref());

    let response = book_appointment(
        &state.calendar,
        calendar_id,
        state.repository.as_ref(),
        &policy,
        &request,
    )
    .await
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for `POST /log-call`: records the outcome of a call that did
/// not (or did) end in a meeting.
#[axum::debug_handler]
pub async fn log_call_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<CallLogRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ErrorResponse> {
    let repository = state.repository.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"error": "Database service is disabled."})),
    ))?;

    let message = log_call(repository, &request).await.map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message,
            google_calendar_event_id: None,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookline_db::DbError;

    #[test]
    fn errors_serialize_as_json_error_objects() {
        // Same body shape as the auth middleware's 401
        let (status, Json(body)) = error_response(BookingError::InvalidTimeFormat);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid date format."}));
    }

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        let (conflict, _) = error_response(BookingError::Conflict);
        assert_eq!(conflict, StatusCode::CONFLICT);

        let (database, Json(body)) =
            error_response(BookingError::Database(DbError::QueryError("down".into())));
        assert_eq!(database, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().is_some_and(|m| m.contains("down")));
    }
}
