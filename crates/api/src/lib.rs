//! # Slotwise API
//!
//! The API crate provides the web server for the Slotwise booking widget. It
//! exposes availability lookup, booking submission, appointment management and
//! SMS endpoints.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping shared by every handler
//! - **Config**: Handle environment and application configuration
//!
//! Handlers never touch the database or Twilio directly. They go through the
//! [`AppointmentStore`] and [`SmsGateway`] held by [`ApiState`], which `main`
//! builds once at startup.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Error mapping shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use slotwise_core::availability::AvailabilityEngine;
use slotwise_core::store::AppointmentStore;
use slotwise_notify::SmsGateway;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Every field is built once in `main` and shared by reference; nothing here is
/// created lazily.
pub struct ApiState {
    /// Appointment persistence
    pub store: Arc<dyn AppointmentStore>,

    /// Business hours and timezone used to generate slots
    pub engine: AvailabilityEngine,

    /// Outbound SMS, `None` when Twilio is not configured
    pub sms: Option<Arc<dyn SmsGateway>>,

    /// Longest inclusive day range one availability query may span
    pub max_range_days: i64,

    /// Timezone echoed back when an availability query omits one
    pub default_client_timezone: String,
}

impl ApiState {
    pub fn from_config(
        config: &config::ApiConfig,
        store: Arc<dyn AppointmentStore>,
        sms: Option<Arc<dyn SmsGateway>>,
    ) -> Self {
        Self {
            store,
            engine: AvailabilityEngine::new(
                config.business_hours.clone(),
                config.business_timezone,
            ),
            sms,
            max_range_days: config.max_range_days,
            default_client_timezone: config.default_client_timezone.clone(),
        }
    }
}

/// Installs the global `tracing` subscriber at `log_level`.
pub fn init_tracing(log_level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Builds the application router with all routes and request tracing.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot lookup
        .merge(routes::availability::routes())
        // Booking and appointment management
        .merge(routes::appointments::routes())
        // Direct SMS sending
        .merge(routes::sms::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Wraps `app` in the layers every deployment gets: CORS for the embedding
/// page, security headers, gzip and the per-request timeout.
pub fn with_http_layers(app: Router, config: &config::ApiConfig) -> Router {
    let app = match cors_layer(&config.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.layer(SetResponseHeaderLayer::if_not_present(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ))
    .layer(SetResponseHeaderLayer::if_not_present(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("SAMEORIGIN"),
    ))
    .layer(SetResponseHeaderLayer::if_not_present(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    ))
    .layer(CompressionLayer::new())
    .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    if origins.iter().any(|origin| origin == "*") {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        )
        .allow_credentials(true);

    Some(cors)
}

/// Starts the API server with the provided configuration and shared state
///
/// Applies [`with_http_layers`] on top of [`app`], binds the configured
/// address and serves until the process is stopped.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = with_http_layers(app(state), &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
