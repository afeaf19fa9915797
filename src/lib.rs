//! Places Gateway - a read-only proxy in front of the Google Places web service
//!
//! Clients call three operations and never see the provider credential:
//! - Text search (`GET /api/places?query=...`)
//! - Place details (`GET /api/places/details/{place_id}`)
//! - Nearby search (`POST /api/places`)
//!
//! Every places response is wrapped in a `{success, ...}` envelope and
//! provider statuses are mapped onto HTTP status codes.
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Inbound queries, normalized place shapes and envelopes
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request IDs, security headers and request metrics
//! - `services/` - The places gateway, outbound HTTP client and metrics
//! - `utils/` - Request inspection helpers
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing setup and credential redaction
//!
//! ## Quick Start
//!
//! ```no_run
//! use places_gateway::{AppState, create_app};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_env().map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

// Core modules
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{LogFormat, MetricsConfig, PlacesConfig, SecurityHeadersConfig, ServerConfig};
pub use handlers::{
    AppState, StartupError, create_app, create_openapi_spec, get_metrics, health, nearby_places,
    place_details, search_places, version,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders};
pub use models::{
    DetailResult, ErrorEnvelope, HealthResponse, NearbyPlace, NearbyRequest, NearbyResultPage,
    PlaceDetail, PlaceSummary, SearchQuery, SearchResultPage, SuccessEnvelope, VersionResponse,
};
pub use services::{
    AppMetrics, PlacesError, PlacesService, ResilientClient, ResilientClientConfig,
    ResilientClientError, ResilientClientMetrics, RetryConfig,
};
pub use telemetry::{init_tracing, redact_credentials};
pub use utils::{extract_client_ip, extract_route_pattern, extract_user_agent};
