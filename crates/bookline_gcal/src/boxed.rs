// --- File: crates/bookline_gcal/src/boxed.rs ---
//! Error-erasing adapter so callers can hold the calendar behind
//! `Arc<dyn CalendarService<Error = BoxedError>>` regardless of backend.

use bookline_common::services::{
    BoxFuture, BoxedError, CalendarEvent, CalendarEventResult, CalendarService,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::service::GoogleCalendarService;

struct BoxedCalendarService {
    inner: GoogleCalendarService,
}

impl CalendarService for BoxedCalendarService {
    type Error = BoxedError;

    fn list_busy_intervals(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .list_busy_intervals(&calendar_id, time_min, time_max)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_event(&calendar_id, event)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Wraps a concrete Google Calendar service into the trait-object form the
/// booking layer works against.
pub fn into_boxed(inner: GoogleCalendarService) -> Arc<dyn CalendarService<Error = BoxedError>> {
    Arc::new(BoxedCalendarService { inner })
}
