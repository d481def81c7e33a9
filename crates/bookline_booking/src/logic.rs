// --- File: crates/bookline_booking/src/logic.rs ---
//! Orchestration between the HTTP surface, the availability engine, the
//! calendar, and the lead repository.

use crate::models::{
    AvailabilityRequest, AvailabilityResponse, BookingRequest, BookingResponse, CallLogRequest,
    SlotSuggestion,
};
use bookline_common::services::{BoxedError, CalendarEvent, CalendarService};
use bookline_config::BookingConfig;
use bookline_db::{BookingRecord, CallRecord, DbError, LeadRepository};
use bookline_engine::availability::{check_specific_slot, find_next_slots, AvailabilityVerdict};
use bookline_engine::format::human_readable_in_zone;
use bookline_engine::interval::Interval;
use bookline_engine::policy::{weekday_from_name, BusinessHoursPolicy};
use bookline_gcal::service::GcalServiceError;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub const MSG_PAST: &str = "Sorry, that time is in the past.";
pub const MSG_OUTSIDE_HOURS: &str =
    "Apologies, that's outside our business hours of Monday to Friday, 8 AM to 4 PM.";
pub const MSG_NO_SLOTS: &str =
    "Sorry, I couldn't find any open 1-hour slots in the next two weeks.";
pub const MSG_ALTERNATIVES: &str =
    "Unfortunately, that time is not available. However, some other times that work are:";
pub const MSG_UPCOMING: &str = "Sure, here are some upcoming available times:";
pub const MSG_CALL_LOGGED: &str = "Call log received.";

/// Errors produced by the booking flow.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid date format.")]
    InvalidTimeFormat,
    #[error("Missing or invalid required fields: {0}")]
    Validation(String),
    #[error("Server configuration error: {0}")]
    Config(String),
    #[error("Calendar service error: {0}")]
    Calendar(BoxedError),
    #[error("That time was just taken by another booking.")]
    Conflict,
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl bookline_common::HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::InvalidTimeFormat | BookingError::Validation(_) => 400,
            BookingError::Conflict => 409,
            BookingError::Calendar(_) => 502,
            BookingError::Config(_) | BookingError::Database(_) => 500,
        }
    }
}

/// Maps a boxed calendar failure back onto the booking taxonomy; a conflict
/// detected at event creation surfaces as its own variant.
fn classify_calendar_error(err: BoxedError) -> BookingError {
    if matches!(
        err.0.downcast_ref::<GcalServiceError>(),
        Some(GcalServiceError::Conflict)
    ) {
        BookingError::Conflict
    } else {
        BookingError::Calendar(err)
    }
}

/// Builds the engine policy from the optional booking config section,
/// falling back to the defaults for anything unset or unparseable.
pub fn policy_from_config(booking: Option<&BookingConfig>) -> BusinessHoursPolicy {
    let mut policy = BusinessHoursPolicy::default();
    let Some(config) = booking else {
        return policy;
    };

    if let Some(zone_name) = &config.time_zone {
        match Tz::from_str(zone_name) {
            Ok(zone) => policy.zone = zone,
            Err(_) => warn!("Unknown time zone '{}', keeping {}", zone_name, policy.zone),
        }
    }
    if let Some(hour) = config.business_hours_start {
        policy.start_hour = hour;
    }
    if let Some(hour) = config.business_hours_end {
        policy.end_hour = hour;
    }
    if let Some(names) = &config.business_days {
        let days: Vec<_> = names
            .iter()
            .filter_map(|name| {
                let day = weekday_from_name(name);
                if day.is_none() {
                    warn!("Unknown business day '{}', ignoring", name);
                }
                day
            })
            .collect();
        if !days.is_empty() {
            policy.business_days = days;
        }
    }
    // Non-positive durations would stall the grid scan or break the
    // interval invariant, so they keep the defaults like other bad values.
    if let Some(minutes) = config.slot_duration_minutes {
        if minutes > 0 {
            policy.slot_duration = chrono::Duration::minutes(minutes);
        } else {
            warn!("Ignoring non-positive slot_duration_minutes {}", minutes);
        }
    }
    if let Some(minutes) = config.step_minutes {
        if minutes > 0 {
            policy.step = chrono::Duration::minutes(minutes);
        } else {
            warn!("Ignoring non-positive step_minutes {}", minutes);
        }
    }
    if let Some(minutes) = config.lead_time_minutes {
        if minutes >= 0 {
            policy.lead_time = chrono::Duration::minutes(minutes);
        } else {
            warn!("Ignoring negative lead_time_minutes {}", minutes);
        }
    }
    if let Some(days) = config.search_window_days {
        if days > 0 {
            policy.search_window = chrono::Duration::days(days);
        } else {
            warn!("Ignoring non-positive search_window_days {}", days);
        }
    }
    if let Some(count) = config.suggestion_count {
        policy.suggestion_count = count;
    }
    policy
}

/// Parses a client-supplied time into UTC.
///
/// An RFC3339 string keeps its explicit offset. A naive timestamp (no
/// offset) is read as wall-clock time in the business zone, which is what
/// voice agents send.
pub fn parse_client_time(raw: &str, zone: &Tz) -> Result<DateTime<Utc>, BookingError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return match zone.from_local_datetime(&naive) {
                LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
                // DST fold: take the earlier reading
                LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
                // DST gap: the wall-clock time does not exist
                LocalResult::None => Err(BookingError::InvalidTimeFormat),
            };
        }
    }
    Err(BookingError::InvalidTimeFormat)
}

/// Fetches the busy intervals covering the whole decision: the search
/// window, extended to the requested slot if that reaches further out.
async fn fetch_busy_intervals(
    calendar: &Arc<dyn CalendarService<Error = BoxedError>>,
    calendar_id: &str,
    now: DateTime<Utc>,
    policy: &BusinessHoursPolicy,
    requested_start: Option<DateTime<Utc>>,
) -> Result<Vec<Interval>, BookingError> {
    let mut time_max = now + policy.search_window;
    if let Some(requested) = requested_start {
        let requested_end = requested + policy.slot_duration;
        if requested_end > time_max {
            time_max = requested_end;
        }
    }

    let raw = calendar
        .list_busy_intervals(calendar_id, now, time_max)
        .await
        .map_err(BookingError::Calendar)?;

    Ok(raw
        .into_iter()
        .filter(|(start, end)| start < end)
        .map(|(start, end)| Interval::new(start, end))
        .collect())
}

fn format_suggestions(slots: &[Interval], zone: &Tz) -> Vec<SlotSuggestion> {
    slots
        .iter()
        .map(|slot| SlotSuggestion {
            human_readable: human_readable_in_zone(slot.start, zone),
            iso_8601: slot.start.to_rfc3339(),
        })
        .collect()
}

fn unavailable(message: &str) -> AvailabilityResponse {
    AvailabilityResponse {
        status: "unavailable".to_string(),
        message: Some(message.to_string()),
        iso_8601: None,
        next_available_slots: None,
    }
}

fn slots_found(message: &str, suggestions: Vec<SlotSuggestion>) -> AvailabilityResponse {
    AvailabilityResponse {
        status: "available_slots_found".to_string(),
        message: Some(message.to_string()),
        iso_8601: None,
        next_available_slots: Some(suggestions),
    }
}

/// Availability decision behind `POST /get-availability`.
pub async fn get_availability(
    calendar: &Arc<dyn CalendarService<Error = BoxedError>>,
    calendar_id: &str,
    policy: &BusinessHoursPolicy,
    request: &AvailabilityRequest,
    now: DateTime<Utc>,
) -> Result<AvailabilityResponse, BookingError> {
    if let Some(raw_start) = request
        .start_time
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        let requested_start = parse_client_time(raw_start, &policy.zone)?;
        let busy =
            fetch_busy_intervals(calendar, calendar_id, now, policy, Some(requested_start)).await?;

        return Ok(
            match check_specific_slot(requested_start, &busy, now, policy) {
                AvailabilityVerdict::PastOrOutOfHours(reason) => {
                    info!(requested = %requested_start, "Rejected slot request: {}", reason);
                    match reason {
                        bookline_engine::availability::RejectionReason::InPast => {
                            unavailable(MSG_PAST)
                        }
                        bookline_engine::availability::RejectionReason::OutsideBusinessHours => {
                            unavailable(MSG_OUTSIDE_HOURS)
                        }
                    }
                }
                AvailabilityVerdict::SpecificSlotAvailable(start) => AvailabilityResponse {
                    status: "available".to_string(),
                    message: None,
                    iso_8601: Some(start.to_rfc3339()),
                    next_available_slots: None,
                },
                AvailabilityVerdict::SpecificSlotUnavailable { suggestions } => {
                    if suggestions.is_empty() {
                        unavailable(MSG_NO_SLOTS)
                    } else {
                        slots_found(MSG_ALTERNATIVES, format_suggestions(&suggestions, &policy.zone))
                    }
                }
                // The two scan-only verdicts cannot come out of a
                // specific-slot check
                other => {
                    return Err(BookingError::Config(format!(
                        "Unexpected verdict: {:?}",
                        other
                    )))
                }
            },
        );
    }

    let busy = fetch_busy_intervals(calendar, calendar_id, now, policy, None).await?;
    Ok(match find_next_slots(now, &busy, policy) {
        AvailabilityVerdict::SuggestionsFound(slots) => {
            slots_found(MSG_UPCOMING, format_suggestions(&slots, &policy.zone))
        }
        _ => unavailable(MSG_NO_SLOTS),
    })
}

/// Books the appointment behind `POST /book-appointment`, returning the
/// confirmation message and the created event id.
///
/// Persistence is best-effort: once the calendar event exists the booking
/// has succeeded, and repository failures are logged but never surfaced.
pub async fn book_appointment(
    calendar: &Arc<dyn CalendarService<Error = BoxedError>>,
    calendar_id: &str,
    repository: Option<&Arc<dyn LeadRepository>>,
    policy: &BusinessHoursPolicy,
    request: &BookingRequest,
) -> Result<BookingResponse, BookingError> {
    request.validate().map_err(BookingError::Validation)?;

    let start = parse_client_time(&request.start_time, &policy.zone)?;
    let end = start + policy.slot_duration;

    let name = request.name.trim();
    let first_name = name.split_whitespace().next().unwrap_or(name);

    let summary = format!(
        "Onboarding call with {} from {} to discuss the 'Project Pipeline AI'.",
        name, request.company_name
    );
    let description = format!(
        "Stated Goal: {}\nStated Budget: R{}/month\n\nLead Contact: {}\nLead Phone: {}",
        request.goal,
        request.monthly_budget,
        request.email,
        request.client_number.as_deref().unwrap_or("Not provided")
    );

    let event = CalendarEvent {
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
        summary,
        description: Some(description),
    };

    let created = calendar
        .create_event(calendar_id, event)
        .await
        .map_err(classify_calendar_error)?;
    info!(event_id = ?created.event_id, "Calendar event created");

    if let Some(repo) = repository {
        let booking = BookingRecord {
            full_name: name.to_string(),
            email: request.email.clone(),
            company_name: request.company_name.clone(),
            start_time: request.start_time.clone(),
            goal: request.goal.clone(),
            monthly_budget: request.monthly_budget,
            google_calendar_event_id: created.event_id.clone(),
            client_number: request.client_number.clone(),
        };
        if let Err(e) = repo.save_booking(booking).await {
            warn!("Failed to save booking to meetings table: {}", e);
        }

        let call = CallRecord {
            full_name: name.to_string(),
            email: Some(request.email.clone()),
            company_name: request.company_name.clone(),
            goal: request.goal.clone(),
            monthly_budget: request.monthly_budget,
            resulted_in_meeting: true,
            disqualification_reason: None,
            client_number: request.client_number.clone(),
            call_duration_seconds: request.call_duration_seconds.unwrap_or(0),
        };
        if let Err(e) = repo.log_call(call).await {
            warn!("Failed to log call to call_history table: {}", e);
        }
    }

    Ok(BookingResponse {
        message: format!(
            "Perfect, {}! I've successfully booked your 1-hour call. \
             Our team will send a calendar invitation to {} shortly to confirm.",
            first_name, request.email
        ),
        google_calendar_event_id: created.event_id,
    })
}

/// Records a call outcome behind `POST /log-call`. Unlike the booking
/// path, this endpoint exists to persist, so repository failures are
/// surfaced.
pub async fn log_call(
    repository: &Arc<dyn LeadRepository>,
    request: &CallLogRequest,
) -> Result<String, BookingError> {
    request.validate().map_err(BookingError::Validation)?;

    let record = CallRecord {
        full_name: request.full_name.clone(),
        email: request.email.clone(),
        company_name: request.company_name.clone(),
        goal: request.goal.clone(),
        monthly_budget: request.monthly_budget,
        resulted_in_meeting: request.resulted_in_meeting,
        disqualification_reason: request.disqualification_reason.clone(),
        client_number: request.client_number.clone(),
        call_duration_seconds: request.call_duration_seconds.unwrap_or(0),
    };

    repository.log_call(record).await?;
    Ok(MSG_CALL_LOGGED.to_string())
}
