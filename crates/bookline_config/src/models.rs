// --- File: crates/bookline_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via APP_DATABASE__URL or DATABASE_URL
}

// --- Google Calendar Config ---
// Exactly one of key_path / credentials_json must be set. credentials_json
// accepts the raw service-account JSON or its base64 encoding.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub key_path: Option<String>,
    pub credentials_json: Option<String>, // GOOGLE_CREDENTIALS_JSON
    pub calendar_id: Option<String>,      // GOOGLE_CALENDAR_ID
}

// --- Auth Config ---
// Holds the shared secret callers must present. Loaded via APP_AUTH__API_KEY
// or the bare API_KEY env var.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthConfig {
    pub api_key: Option<String>,
}

// --- Booking Policy Config ---
// Business-hour and slot-search settings. Every field is optional; the
// engine's policy defaults apply when a field is absent.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    /// IANA zone name for business hours, e.g. "Africa/Johannesburg"
    pub time_zone: Option<String>,
    pub business_hours_start: Option<u32>,
    pub business_hours_end: Option<u32>,
    /// Short weekday names, e.g. ["Mon", "Tue", "Wed", "Thu", "Fri"]
    pub business_days: Option<Vec<String>>,
    pub slot_duration_minutes: Option<i64>,
    pub step_minutes: Option<i64>,
    pub lead_time_minutes: Option<i64>,
    pub search_window_days: Option<i64>,
    pub suggestion_count: Option<usize>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_database: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
}
