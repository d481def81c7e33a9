// File: crates/bookline_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{
    AvailabilityRequest, AvailabilityResponse, BookingRequest, BookingResponse, CallLogRequest,
    SlotSuggestion,
};

#[utoipa::path(
    post,
    path = "/get-availability",
    request_body(content = AvailabilityRequest, example = json!({
        "start_time": "2025-05-05T10:00:00"
    })),
    responses(
        (status = 200, description = "Availability verdict", body = AvailabilityResponse,
         example = json!({
             "status": "available_slots_found",
             "message": "Sure, here are some upcoming available times:",
             "next_available_slots": [
                 {
                     "human_readable": "Monday, May 05 at 11:00 AM",
                     "iso_8601": "2025-05-05T09:00:00+00:00"
                 }
             ]
         })
        ),
        (status = 400, description = "Invalid date format", body = String),
        (status = 401, description = "Missing or invalid API key"),
        (status = 502, description = "Calendar backend failure", body = String)
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/book-appointment",
    request_body(content = BookingRequest, example = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "start_time": "2025-05-05T10:00:00",
        "goal": "Automate lead intake",
        "monthly_budget": 5000,
        "company_name": "Acme Ltd",
        "client_number": "+27821234567",
        "call_duration_seconds": 340
    })),
    responses(
        (status = 201, description = "Appointment booked", body = BookingResponse,
         example = json!({
             "message": "Perfect, Jane! I've successfully booked your 1-hour call. Our team will send a calendar invitation to jane@example.com shortly to confirm.",
             "google_calendar_event_id": "abc123def456"
         })
        ),
        (status = 400, description = "Missing or invalid required fields", body = String),
        (status = 401, description = "Missing or invalid API key"),
        (status = 409, description = "Slot already taken", body = String),
        (status = 502, description = "Calendar backend failure", body = String)
    )
)]
fn doc_book_appointment_handler() {}

#[utoipa::path(
    post,
    path = "/log-call",
    request_body(content = CallLogRequest, example = json!({
        "full_name": "John Smith",
        "company_name": "Widgets Inc",
        "resulted_in_meeting": false,
        "disqualification_reason": "Budget below minimum",
        "call_duration_seconds": 95
    })),
    responses(
        (status = 201, description = "Call log stored", body = BookingResponse,
         example = json!({"message": "Call log received."})
        ),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid API key"),
        (status = 503, description = "Database disabled", body = String)
    )
)]
fn doc_log_call_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_book_appointment_handler,
        doc_log_call_handler
    ),
    components(
        schemas(
            AvailabilityRequest,
            AvailabilityResponse,
            SlotSuggestion,
            BookingRequest,
            BookingResponse,
            CallLogRequest
        )
    ),
    tags(
        (name = "booking", description = "Availability and booking API")
    )
)]
pub struct BookingApiDoc;
