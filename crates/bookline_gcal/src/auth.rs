// File: crates/bookline_gcal/src/auth.rs
use base64::Engine;
use bookline_config::GcalConfig;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{parse_service_account_key, read_service_account_key, ServiceAccountAuthenticator},
    CalendarHub,
};
use std::{error::Error, path::Path};

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds an authenticated Calendar hub from the service-account credentials
/// in the configuration.
///
/// Credentials may be given as a key file path, or inline via
/// `credentials_json` (either raw JSON or base64-encoded JSON, which is how
/// they usually travel through environment variables).
pub async fn create_calendar_hub(
    config: &GcalConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let sa_key = if let Some(inline) = config.credentials_json.as_deref() {
        let json = decode_inline_credentials(inline)?;
        parse_service_account_key(&json)?
    } else {
        let key_path = config
            .key_path
            .as_deref()
            .ok_or("Missing key_path or credentials_json in GcalConfig")?;
        read_service_account_key(Path::new(key_path)).await?
    };

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = CalendarHub::new(client, auth);

    Ok(hub)
}

fn decode_inline_credentials(inline: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let trimmed = inline.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(trimmed)
        .map_err(|e| format!("credentials_json is neither JSON nor base64: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::decode_inline_credentials;
    use base64::Engine;

    #[test]
    fn raw_json_passes_through() {
        let json = r#"{"type": "service_account"}"#;
        assert_eq!(decode_inline_credentials(json).unwrap(), json);
    }

    #[test]
    fn base64_is_decoded() {
        let json = r#"{"type": "service_account"}"#;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json);
        assert_eq!(decode_inline_credentials(&encoded).unwrap(), json);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_inline_credentials("not json, not base64!").is_err());
    }
}
