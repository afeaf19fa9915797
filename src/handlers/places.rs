//! Places endpoint handlers.
//!
//! Each handler delegates to [`PlacesService`] and wraps the outcome in the
//! `{success, ...}` envelope. Failures propagate as [`PlacesError`], whose
//! `ResponseError` impl renders the failure envelope and status code.

use crate::{
    models::{NearbyRequest, SearchQuery, SuccessEnvelope},
    services::places::{PLACE_ID_REQUIRED, PlacesError, PlacesService},
    telemetry::redact_credentials,
};
use actix_web::{
    Error, HttpRequest, HttpResponse, ResponseError, Result,
    error::{JsonPayloadError, QueryPayloadError},
    web,
};
use paperclip::actix::api_v2_operation;

/// Text search endpoint
#[api_v2_operation(
    summary = "Search Places",
    description = "Free-text place search (e.g. ?query=pizza). Supplying both latitude and longitude biases results around that point within `radius` meters (default 50000). `type` filters by provider category and `pagetoken` fetches the next page of a previous search.",
    tags("Places"),
    responses(
        (status = 200, description = "Search results, possibly empty"),
        (status = 400, description = "Missing query, invalid coordinates, or provider rejected the request"),
        (status = 500, description = "API key not configured or provider unreachable")
    )
)]
pub async fn search_places(
    places: web::Data<PlacesService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, Error> {
    let page = places
        .search(&query)
        .await
        .inspect_err(|e| log_failure("search", e))?;

    Ok(HttpResponse::Ok().json(SuccessEnvelope::new(page)))
}

/// Place details endpoint
#[api_v2_operation(
    summary = "Place Details",
    description = "Full record for a single place: contact details, address components, opening hours, photos with attributions and reviews.",
    tags("Places"),
    responses(
        (status = 200, description = "Place details"),
        (status = 400, description = "Missing place id or provider rejected the request"),
        (status = 500, description = "API key not configured or provider unreachable")
    )
)]
pub async fn place_details(
    places: web::Data<PlacesService>,
    place_id: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let detail = places
        .details(&place_id)
        .await
        .inspect_err(|e| log_failure("details", e))?;

    Ok(HttpResponse::Ok().json(SuccessEnvelope::new(detail)))
}

/// Details route hit without a place id
#[api_v2_operation(
    summary = "Place Details (missing id)",
    description = "Always rejects: a place id path segment is required.",
    tags("Places"),
    responses((status = 400, description = "Place ID parameter is required"))
)]
pub async fn place_details_missing_id() -> Result<HttpResponse, Error> {
    Err(PlacesError::validation(PLACE_ID_REQUIRED).into())
}

/// Nearby search endpoint
#[api_v2_operation(
    summary = "Nearby Places",
    description = "Places around a point. Body: {latitude, longitude, radius?, type?, keyword?, pagetoken?}; radius defaults to 1500 meters.",
    tags("Places"),
    responses(
        (status = 200, description = "Nearby results, possibly empty"),
        (status = 400, description = "Missing coordinates or provider rejected the request"),
        (status = 500, description = "API key not configured or provider unreachable")
    )
)]
pub async fn nearby_places(
    places: web::Data<PlacesService>,
    body: web::Json<NearbyRequest>,
) -> Result<HttpResponse, Error> {
    let page = places
        .nearby(&body)
        .await
        .inspect_err(|e| log_failure("nearby", e))?;

    Ok(HttpResponse::Ok().json(SuccessEnvelope::new(page)))
}

/// Rejects mutation attempts; places are read-only through this gateway
#[api_v2_operation(
    summary = "Unsupported Method",
    description = "PUT and DELETE are not supported on places.",
    tags("Places"),
    responses((status = 405, description = "Method not supported"))
)]
pub async fn places_method_not_supported() -> Result<HttpResponse, Error> {
    Err(PlacesError::MethodNotSupported.into())
}

/// Turns query-string parse failures into the validation envelope
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    PlacesError::validation(format!("Invalid query parameters: {err}")).into()
}

/// Turns JSON body failures into the validation envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    PlacesError::validation(format!("Invalid request body: {err}")).into()
}

fn log_failure(operation: &str, err: &PlacesError) {
    let error = redact_credentials(&err.to_string());

    if err.status_code().is_server_error() {
        tracing::error!(operation, kind = err.kind(), error = %error, "Places request failed");
    } else {
        tracing::warn!(operation, kind = err.kind(), error = %error, "Places request rejected");
    }
}
