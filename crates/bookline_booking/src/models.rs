// --- File: crates/bookline_booking/src/models.rs ---
//! Request and response payloads for the booking endpoints.

use serde::{Deserialize, Serialize};

fn default_not_provided() -> String {
    "Not provided".to_string()
}

/// Body of `POST /get-availability`. An empty body (or one without
/// `start_time`) asks for the next open slots instead of judging a
/// specific one.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityRequest {
    pub start_time: Option<String>,
}

/// Body of `POST /book-appointment`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub start_time: String,
    #[serde(default = "default_not_provided")]
    pub goal: String,
    #[serde(default)]
    pub monthly_budget: i64,
    #[serde(default = "default_not_provided")]
    pub company_name: String,
    #[serde(default)]
    pub client_number: Option<String>,
    #[serde(default)]
    pub call_duration_seconds: Option<i64>,
}

impl BookingRequest {
    /// Field-level validation beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !is_plausible_email(&self.email) {
            return Err("email is not a valid address".to_string());
        }
        if self.start_time.trim().is_empty() {
            return Err("start_time must not be empty".to_string());
        }
        Ok(())
    }
}

/// Body of `POST /log-call`: the outcome of a call that may or may not
/// have led to a meeting.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize)]
pub struct CallLogRequest {
    #[serde(default = "default_not_provided")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_not_provided")]
    pub company_name: String,
    #[serde(default = "default_not_provided")]
    pub goal: String,
    #[serde(default)]
    pub monthly_budget: i64,
    #[serde(default)]
    pub resulted_in_meeting: bool,
    #[serde(default)]
    pub disqualification_reason: Option<String>,
    #[serde(default)]
    pub client_number: Option<String>,
    #[serde(default)]
    pub call_duration_seconds: Option<i64>,
}

impl CallLogRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = &self.email {
            if !is_plausible_email(email) {
                return Err("email is not a valid address".to_string());
            }
        }
        Ok(())
    }
}

/// One suggested slot, rendered for both machines and voice agents.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    /// Local wall-clock rendering, e.g. "Monday, May 05 at 1:15 PM".
    pub human_readable: String,
    /// The same instant as UTC RFC3339.
    pub iso_8601: String,
}

/// Response of `POST /get-availability`. The populated fields depend on
/// `status`: `available` carries `iso_8601`, `available_slots_found`
/// carries `next_available_slots`, `unavailable` carries only `message`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_8601: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_slots: Option<Vec<SlotSuggestion>>,
}

/// Response of `POST /book-appointment` and `POST /log-call`. The event id
/// is present only for bookings.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_calendar_event_id: Option<String>,
}

// Deliberately loose: one '@' with something on both sides. Full RFC
// validation is the mail provider's problem.
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_request_defaults_apply() {
        let json = r#"{"name": "Jane Doe", "email": "jane@example.com", "start_time": "2025-05-05T10:00:00Z"}"#;
        let request: BookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.goal, "Not provided");
        assert_eq!(request.company_name, "Not provided");
        assert_eq!(request.monthly_budget, 0);
        assert!(request.client_number.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn blank_name_fails_validation() {
        let json = r#"{"name": "  ", "email": "jane@example.com", "start_time": "2025-05-05T10:00:00Z"}"#;
        let request: BookingRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn bad_email_fails_validation() {
        let json = r#"{"name": "Jane", "email": "not-an-email", "start_time": "2025-05-05T10:00:00Z"}"#;
        let request: BookingRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn availability_response_skips_empty_fields() {
        let response = AvailabilityResponse {
            status: "unavailable".to_string(),
            message: Some("Sorry, that time is in the past.".to_string()),
            iso_8601: None,
            next_available_slots: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("iso_8601").is_none());
        assert!(json.get("next_available_slots").is_none());
    }

    #[test]
    fn call_log_defaults_apply() {
        let request: CallLogRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.full_name, "Not provided");
        assert!(!request.resulted_in_meeting);
        assert!(request.validate().is_ok());
    }
}
