// --- File: crates/bookline_config/src/lib.rs ---

pub mod models;

pub use models::{
    AppConfig, AuthConfig, BookingConfig, DatabaseConfig, GcalConfig, ServerConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;
use tracing::debug;

static DOTENV: Once = Once::new();

/// Loads `.env` into the process environment exactly once.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment overrides from .env");
        }
    });
}

/// Loads the unified application configuration.
///
/// Sources are layered, later entries winning:
/// 1. built-in defaults
/// 2. `config/default.toml` (optional)
/// 3. `config/{RUN_ENV}.toml` (optional, `RUN_ENV` defaults to "development")
/// 4. environment variables with the `APP` prefix and `__` separator,
///    e.g. `APP_SERVER__PORT=8080`, `APP_AUTH__API_KEY=...`
///
/// A few bare env vars are bridged afterwards for deployment convenience:
/// `API_KEY`, `GOOGLE_CALENDAR_ID`, `GOOGLE_CREDENTIALS_JSON`, `DATABASE_URL`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

    let config: AppConfig = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    Ok(apply_env_overrides(config))
}

/// Applies the bare (unprefixed) env-var bridges onto a loaded config.
pub fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    if let Ok(api_key) = std::env::var("API_KEY") {
        config.auth.get_or_insert_with(AuthConfig::default).api_key = Some(api_key);
    }
    if let Ok(calendar_id) = std::env::var("GOOGLE_CALENDAR_ID") {
        config.gcal.get_or_insert_with(GcalConfig::default).calendar_id = Some(calendar_id);
    }
    if let Ok(credentials) = std::env::var("GOOGLE_CREDENTIALS_JSON") {
        config
            .gcal
            .get_or_insert_with(GcalConfig::default)
            .credentials_json = Some(credentials);
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database = Some(DatabaseConfig { url });
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_gcal: false,
            use_database: false,
            database: None,
            gcal: None,
            auth: None,
            booking: None,
        }
    }

    #[test]
    fn minimal_config_deserializes_with_defaults() {
        let json = r#"{ "server": { "host": "0.0.0.0", "port": 9000 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.use_gcal);
        assert!(config.gcal.is_none());
        assert!(config.booking.is_none());
    }

    #[test]
    fn booking_section_deserializes() {
        let json = r#"{
            "server": { "host": "127.0.0.1", "port": 8080 },
            "use_gcal": true,
            "booking": {
                "time_zone": "Africa/Johannesburg",
                "business_hours_start": 8,
                "business_hours_end": 16,
                "business_days": ["Mon", "Tue", "Wed", "Thu", "Fri"],
                "slot_duration_minutes": 60
            }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        let booking = config.booking.unwrap();
        assert_eq!(booking.business_hours_start, Some(8));
        assert_eq!(booking.business_hours_end, Some(16));
        assert_eq!(booking.business_days.unwrap().len(), 5);
        assert_eq!(booking.suggestion_count, None);
    }

    #[test]
    fn app_prefixed_env_override_is_collected() {
        // The prefix is separated by a single underscore, the path segments
        // by double underscores: APP_GCAL__CALENDAR_ID, not
        // APP__GCAL__CALENDAR_ID. Uses the gcal section so the auth-owning
        // test can run in parallel.
        std::env::set_var("APP_GCAL__CALENDAR_ID", "from-env");
        let config = load_config().unwrap();
        assert_eq!(
            config.gcal.unwrap().calendar_id.as_deref(),
            Some("from-env")
        );
        std::env::remove_var("APP_GCAL__CALENDAR_ID");
    }

    #[test]
    fn env_bridge_fills_auth_section() {
        // Serialized env access: this test owns API_KEY for its duration.
        std::env::set_var("API_KEY", "sekrit");
        let config = apply_env_overrides(base_config());
        assert_eq!(config.auth.unwrap().api_key.as_deref(), Some("sekrit"));
        std::env::remove_var("API_KEY");
    }
}
