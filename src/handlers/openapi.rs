//! OpenAPI specification generation and app factory.

use crate::{
    config::{MetricsConfig, SecurityHeadersConfig},
    handlers::{
        get_metrics, health, json_error_handler, nearby_places, place_details,
        place_details_missing_id, places_method_not_supported, query_error_handler,
        search_places, version,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders},
    services::{AppMetrics, PlacesService, ResilientClientError, ResilientClientMetrics},
};
use actix_web::{App, web::JsonConfig, web::QueryConfig};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Places Gateway API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Read-only proxy in front of the Google Places web service.\n\n\
                ## Envelope\n\
                Every places response is a JSON object with a `success` flag.\n\
                Successful responses carry the payload fields next to it:\n\
                ```json\n\
                { \"success\": true, \"results\": [ ... ], \"next_page_token\": null, \"status\": \"OK\" }\n\
                ```\n\
                Failures never carry results:\n\
                ```json\n\
                { \"success\": false, \"message\": \"Google Places API error: REQUEST_DENIED\", \"status\": \"REQUEST_DENIED\", \"error\": \"...\" }\n\
                ```\n\
                \n\
                ## Status mapping\n\
                - Provider `OK` → 200; `ZERO_RESULTS` on search/nearby → 200 with empty results\n\
                - Any other provider status → 400 with the status literal\n\
                - Missing or invalid input → 400, no provider call\n\
                - API key not configured → 500, no provider call\n\
                - Transport or parse failure → 500 with a generic message\n\
                - PUT/DELETE on `/api/places` → 405\n\
                \n\
                ## Configuration\n\
                - `GOOGLE_PLACES_API_KEY`: provider credential (required for places calls)\n\
                - `GOOGLE_PLACES_BASE_URL`: provider endpoint root\n\
                - `RESILIENT_CLIENT_TIMEOUT`: upstream timeout in seconds (default 10)\n\
                - `RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS`: upstream retries (default 0)"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Failures while assembling shared application state at startup
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to build upstream HTTP client: {0}")]
    Client(#[from] ResilientClientError),
}

/// State shared by every worker's `App`
#[derive(Clone)]
pub struct AppState {
    pub places: web::Data<PlacesService>,
    pub metrics: web::Data<AppMetrics>,
    pub metrics_config: web::Data<MetricsConfig>,
    pub security: SecurityHeadersConfig,
}

impl AppState {
    pub fn new(places: PlacesService, metrics: AppMetrics) -> Self {
        Self {
            places: web::Data::new(places),
            metrics: web::Data::new(metrics),
            metrics_config: web::Data::new(MetricsConfig::default()),
            security: SecurityHeadersConfig::default(),
        }
    }

    /// Build state from the environment; the outbound client reports into the
    /// same registry as the inbound metrics
    pub fn from_env() -> Result<Self, StartupError> {
        let metrics = AppMetrics::new()?;
        let client_metrics = ResilientClientMetrics::new(&metrics.registry)?;
        let places = PlacesService::from_env(Some(client_metrics))?;

        Ok(Self {
            metrics_config: web::Data::new(MetricsConfig::from_env()),
            security: SecurityHeadersConfig::from_env(),
            ..Self::new(places, metrics)
        })
    }
}

/// Creates the application with all routes and middleware
///
/// Used by `main` for every worker and by the integration tests, so both
/// exercise the same route table, extractor configuration and middleware.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(SecurityHeaders::new(state.security.clone()))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware::new(state.metrics.clone()))
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(state.places.clone())
        .app_data(state.metrics.clone())
        .app_data(state.metrics_config.clone())
        .app_data(QueryConfig::default().error_handler(query_error_handler))
        .app_data(JsonConfig::default().error_handler(json_error_handler))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(
            web::resource("/api/places")
                .route(web::get().to(search_places))
                .route(web::post().to(nearby_places))
                .route(web::put().to(places_method_not_supported))
                .route(web::delete().to(places_method_not_supported)),
        )
        .service(
            web::resource("/api/places/details")
                .route(web::get().to(place_details_missing_id)),
        )
        .service(
            web::resource("/api/places/details/")
                .route(web::get().to(place_details_missing_id)),
        )
        .service(
            web::resource("/api/places/details/{place_id}")
                .route(web::get().to(place_details)),
        )
        .with_json_spec_at("/api/spec/v2")
        .build()
}
