// --- File: crates/bookline_booking/src/auth.rs ---

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use bookline_config::AppConfig;
use constant_time_eq::constant_time_eq;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

const API_KEY_HEADER: &str = "X-API-Key";

/// Axum middleware guarding the booking endpoints.
///
/// The shared key may arrive as `X-API-Key` or as a bearer token; the
/// header takes precedence. Comparison is constant-time.
pub async fn require_api_key(
    State(config): State<Arc<AppConfig>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let expected = match config.auth.as_ref().and_then(|auth| auth.api_key.clone()) {
        Some(key) if !key.is_empty() => key,
        _ => {
            error!("API key not configured; refusing request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Server configuration error."})),
            )
                .into_response();
        }
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .or_else(|| {
            req.headers()
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
        });

    match provided {
        Some(key) if constant_time_eq(key.as_bytes(), expected.as_bytes()) => next.run(req).await,
        _ => {
            warn!("Unauthorized API access attempt.");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Unauthorized"})),
            )
                .into_response()
        }
    }
}
