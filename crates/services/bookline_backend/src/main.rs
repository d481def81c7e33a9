// File: crates/services/bookline_backend/src/main.rs
use axum::{routing::get, Json, Router};
use bookline_booking::routes as booking_routes;
use bookline_common::{is_database_enabled, is_gcal_enabled, logging};
use bookline_config::load_config;
use bookline_db::{DbClient, LeadRepository, SqlLeadRepository};
use bookline_gcal::{auth::create_calendar_hub, boxed::into_boxed, service::GoogleCalendarService};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Unauthenticated liveness probe.
#[axum::debug_handler]
async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

#[tokio::main]
async fn main() {
    logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let mut app = Router::new().route("/", get(health_check));

    // Lead persistence is optional: a missing or unreachable database must
    // never keep the booking flow from starting.
    let repository: Option<Arc<dyn LeadRepository>> = if is_database_enabled(&config) {
        match DbClient::new(&config).await {
            Ok(client) => {
                let repo: Arc<dyn LeadRepository> = Arc::new(SqlLeadRepository::new(client));
                match repo.init_schema().await {
                    Ok(()) => {
                        info!("Database connected, lead repository ready.");
                        Some(repo)
                    }
                    Err(e) => {
                        error!("Failed to initialize lead schema: {}. Lead persistence disabled.", e);
                        None
                    }
                }
            }
            Err(e) => {
                error!("Failed to connect to database: {}. Lead persistence disabled.", e);
                None
            }
        }
    } else {
        info!("Database disabled via runtime config.");
        None
    };

    let calendar = if is_gcal_enabled(&config) {
        match config.gcal.as_ref() {
            Some(gcal_config) => match create_calendar_hub(gcal_config).await {
                Ok(hub) => {
                    info!("Google Calendar service initialized.");
                    Some(into_boxed(GoogleCalendarService::new(Arc::new(hub))))
                }
                Err(e) => {
                    error!("Failed to initialize Google Calendar: {}.", e);
                    None
                }
            },
            None => None,
        }
    } else {
        warn!("Calendar disabled via runtime config.");
        None
    };

    match calendar {
        Some(calendar) => {
            app = app.merge(booking_routes::routes(config.clone(), calendar, repository));
        }
        None => {
            // Only the health check is served; a voice agent hitting the
            // booking endpoints gets 404 instead of half-working behavior.
            warn!("Booking routes not mounted: no calendar service available.");
        }
    }

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use bookline_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookline API",
                version = "0.1.0",
                description = "Scheduling assistant API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "booking", description = "Availability and booking endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /docs");

        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
