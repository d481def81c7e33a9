// --- File: crates/bookline_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! Implements the `CalendarService` trait on top of the Calendar v3 API.

use bookline_common::services::{BoxFuture, CalendarEvent, CalendarEventResult, CalendarService};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Booking conflict")]
    Conflict,
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Lists the busy periods of a calendar within a time range.
    ///
    /// Queries the events list with recurring events expanded, collects the
    /// `[start, end)` pair of every non-cancelled timed event, and returns
    /// them sorted by start time. All-day (date-only) events carry no
    /// wall-clock time and are skipped.
    fn list_busy_intervals(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, events_list) = calendar_hub
                .events()
                .list(&calendar_id)
                .time_min(time_min)
                .time_max(time_max)
                .single_events(true) // Expand recurring events
                .order_by("startTime")
                .doit()
                .await?;

            let mut busy_periods = Vec::new();

            if let Some(items) = events_list.items {
                for event in items {
                    if event.status.as_deref() == Some("cancelled") {
                        continue;
                    }

                    let start = event.start.and_then(|s| s.date_time);
                    let end = event.end.and_then(|e| e.date_time);
                    match (start, end) {
                        (Some(start_dt), Some(end_dt)) => {
                            busy_periods.push((start_dt, end_dt));
                        }
                        _ => {
                            debug!(
                                event_id = event.id.as_deref().unwrap_or("?"),
                                "Skipping event without timed start/end"
                            );
                        }
                    }
                }
            }
            // Sort busy periods for easier processing
            busy_periods.sort_by_key(|k| k.0);
            Ok(busy_periods)
        })
    }

    /// Creates a new calendar event in the specified calendar.
    ///
    /// Validates the RFC3339 times, requires `end > start`, and refuses to
    /// write over an existing busy period (`Conflict`). The conflict check
    /// re-reads the calendar just before insertion, which narrows but does
    /// not close the race with a concurrent booking.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();
        let this = self;

        Box::pin(async move {
            let start_dt = DateTime::parse_from_rfc3339(&event.start_time)
                .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid start_time: {}", e)))?
                .with_timezone(&Utc);
            let end_dt = DateTime::parse_from_rfc3339(&event.end_time)
                .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid end_time: {}", e)))?
                .with_timezone(&Utc);

            if end_dt <= start_dt {
                return Err(GcalServiceError::InvalidEvent(
                    "End time must be after start time".to_string(),
                ));
            }

            // Check for conflicts with existing events
            let busy_times = this
                .list_busy_intervals(&calendar_id, start_dt, end_dt)
                .await?;

            for (busy_start, busy_end) in &busy_times {
                // Overlap: (StartA < EndB) and (EndA > StartB)
                if start_dt < *busy_end && end_dt > *busy_start {
                    return Err(GcalServiceError::Conflict);
                }
            }

            let new_event = google_calendar3::api::Event {
                summary: Some(event.summary),
                description: event.description,
                start: Some(google_calendar3::api::EventDateTime {
                    date_time: Some(start_dt),
                    time_zone: Some("UTC".to_string()), // Store event times in UTC
                    ..Default::default()
                }),
                end: Some(google_calendar3::api::EventDateTime {
                    date_time: Some(end_dt),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockCalendarService;
    use super::*;
    use chrono::TimeZone;

    fn event(start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            start_time: start.to_string(),
            end_time: end.to_string(),
            summary: "Appointment: Test Client".to_string(),
            description: Some("Goal: testing".to_string()),
        }
    }

    #[tokio::test]
    async fn created_event_shows_up_as_busy() {
        let service = MockCalendarService::new();
        let result = service
            .create_event("primary", event("2025-05-05T08:00:00Z", "2025-05-05T09:00:00Z"))
            .await
            .unwrap();
        assert!(result.event_id.is_some());
        assert_eq!(result.status, "confirmed");

        let busy = service
            .list_busy_intervals(
                "primary",
                Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 5, 6, 0, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].0, Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn overlapping_event_is_a_conflict() {
        let service = MockCalendarService::new();
        service
            .create_event("primary", event("2025-05-05T08:00:00Z", "2025-05-05T09:00:00Z"))
            .await
            .unwrap();

        let result = service
            .create_event("primary", event("2025-05-05T08:30:00Z", "2025-05-05T09:30:00Z"))
            .await;
        assert!(matches!(result, Err(GcalServiceError::Conflict)));
    }

    #[tokio::test]
    async fn back_to_back_events_are_allowed() {
        let service = MockCalendarService::new();
        service
            .create_event("primary", event("2025-05-05T08:00:00Z", "2025-05-05T09:00:00Z"))
            .await
            .unwrap();

        let result = service
            .create_event("primary", event("2025-05-05T09:00:00Z", "2025-05-05T10:00:00Z"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn malformed_time_is_rejected() {
        let service = MockCalendarService::new();
        let result = service
            .create_event("primary", event("next tuesday", "2025-05-05T09:00:00Z"))
            .await;
        assert!(matches!(result, Err(GcalServiceError::TimeParseError(_))));
    }

    #[tokio::test]
    async fn inverted_times_are_rejected() {
        let service = MockCalendarService::new();
        let result = service
            .create_event("primary", event("2025-05-05T10:00:00Z", "2025-05-05T09:00:00Z"))
            .await;
        assert!(matches!(result, Err(GcalServiceError::InvalidEvent(_))));
    }
}
