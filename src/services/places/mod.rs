//! The places gateway: validation, credential injection, upstream calls,
//! status mapping and normalization for text search, details and nearby
//! search.
//!
//! `PlacesService` is stateless apart from immutable configuration and the
//! pooled HTTP client, so a single instance serves all requests concurrently.

pub mod error;
mod provider;

pub use error::{PlacesError, UNEXPECTED_ERROR_MESSAGE};

use crate::{
    config::PlacesConfig,
    models::{
        DEFAULT_NEARBY_RADIUS_METERS, DEFAULT_SEARCH_RADIUS_METERS, DetailResult,
        NearbyRequest, NearbyResultPage, PlaceDetail, ResultPage, SearchQuery,
        SearchResultPage,
    },
    services::resilient_client::{
        ResilientClient, ResilientClientConfig, ResilientClientError, ResilientClientMetrics,
    },
};
use provider::{DetailsResponse, SearchResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

pub const QUERY_REQUIRED: &str = "Query parameter is required";
pub const PLACE_ID_REQUIRED: &str = "Place ID parameter is required";
pub const COORDINATES_REQUIRED: &str = "Latitude and longitude are required";
pub const COORDINATES_TOGETHER: &str = "Latitude and longitude must be provided together";

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

const TEXT_SEARCH: &str = "textsearch";
const DETAILS: &str = "details";
const NEARBY_SEARCH: &str = "nearbysearch";

/// Fields requested from the details endpoint
const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,geometry,\
types,address_components,website,opening_hours,rating,user_ratings_total,reviews,photos,\
business_status,price_level";

/// Gateway in front of the Google Places web service
#[derive(Clone)]
pub struct PlacesService {
    config: PlacesConfig,
    client: ResilientClient,
}

impl PlacesService {
    pub fn new(config: PlacesConfig, client: ResilientClient) -> Self {
        Self { config, client }
    }

    /// Build the service from `GOOGLE_PLACES_*` and `RESILIENT_CLIENT_*` variables
    pub fn from_env(metrics: Option<ResilientClientMetrics>) -> Result<Self, ResilientClientError> {
        let client = ResilientClient::new(ResilientClientConfig::from_env(), metrics)?;
        Ok(Self::new(PlacesConfig::from_env(), client))
    }

    /// Whether a provider credential is configured
    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }

    /// Text search, optionally biased towards a point
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage, PlacesError> {
        let text = non_empty(query.query.as_deref().map(str::trim))
            .ok_or_else(|| PlacesError::validation(QUERY_REQUIRED))?;

        let mut params = vec![("query", text.to_string())];

        match (query.latitude, query.longitude) {
            (Some(lat), Some(lng)) => {
                validate_coordinates(lat, lng)?;
                let radius = validate_radius(query.radius.unwrap_or(DEFAULT_SEARCH_RADIUS_METERS))?;
                params.push(("location", format!("{lat},{lng}")));
                params.push(("radius", radius.to_string()));
            }
            (None, None) => {}
            _ => return Err(PlacesError::validation(COORDINATES_TOGETHER)),
        }

        if let Some(place_type) = non_empty(query.place_type.as_deref()) {
            params.push(("type", place_type.to_string()));
        }
        if let Some(token) = non_empty(query.page_token.as_deref()) {
            params.push(("pagetoken", token.to_string()));
        }

        let url = self.endpoint_url(TEXT_SEARCH, &params)?;
        let response: SearchResponse = self.fetch(TEXT_SEARCH, &url).await?;
        into_page(TEXT_SEARCH, response)
    }

    /// Full record for a single place
    pub async fn details(&self, place_id: &str) -> Result<DetailResult, PlacesError> {
        let place_id = non_empty(Some(place_id.trim()))
            .ok_or_else(|| PlacesError::validation(PLACE_ID_REQUIRED))?;

        let params = [
            ("place_id", place_id.to_string()),
            ("fields", DETAIL_FIELDS.to_string()),
        ];

        let url = self.endpoint_url(DETAILS, &params)?;
        let response: DetailsResponse = self.fetch(DETAILS, &url).await?;

        if response.status != STATUS_OK {
            return Err(upstream_error(DETAILS, response.status, response.error_message));
        }

        let result = response.result.ok_or_else(|| {
            PlacesError::Internal("Google Places returned OK without a result".to_string())
        })?;

        debug!(endpoint = DETAILS, place_id = %place_id, "Place details fetched");

        Ok(DetailResult {
            result: PlaceDetail::from(result),
            status: response.status,
        })
    }

    /// Places around a point
    pub async fn nearby(&self, request: &NearbyRequest) -> Result<NearbyResultPage, PlacesError> {
        let (Some(lat), Some(lng)) = (request.latitude, request.longitude) else {
            return Err(PlacesError::validation(COORDINATES_REQUIRED));
        };
        validate_coordinates(lat, lng)?;
        let radius = validate_radius(request.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_METERS))?;

        let mut params = vec![
            ("location", format!("{lat},{lng}")),
            ("radius", radius.to_string()),
        ];

        if let Some(place_type) = non_empty(request.place_type.as_deref()) {
            params.push(("type", place_type.to_string()));
        }
        if let Some(keyword) = non_empty(request.keyword.as_deref()) {
            params.push(("keyword", keyword.to_string()));
        }
        if let Some(token) = non_empty(request.page_token.as_deref()) {
            params.push(("pagetoken", token.to_string()));
        }

        let url = self.endpoint_url(NEARBY_SEARCH, &params)?;
        let response: SearchResponse = self.fetch(NEARBY_SEARCH, &url).await?;
        into_page(NEARBY_SEARCH, response)
    }

    /// Assemble `{base_url}/{endpoint}/json?…&key=…`; fails without a credential
    fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url, PlacesError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PlacesError::MissingCredential)?;

        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{endpoint}/json")).map_err(|e| {
            PlacesError::Internal(format!("Invalid Google Places base URL: {e}"))
        })?;

        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("key", key);

        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, url: &Url) -> Result<T, PlacesError> {
        let response = self.client.get(endpoint, url).await?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(PlacesError::Internal(format!(
                "Google Places responded with HTTP {}",
                http_status.as_u16()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            PlacesError::Internal(format!(
                "Failed to parse Google Places response: {}",
                e.without_url()
            ))
        })
    }
}

/// Map a search/nearby response onto a page, treating ZERO_RESULTS as success
fn into_page<P: From<provider::ProviderPlace>>(
    endpoint: &str,
    response: SearchResponse,
) -> Result<ResultPage<P>, PlacesError> {
    match response.status.as_str() {
        STATUS_OK | STATUS_ZERO_RESULTS => {
            debug!(
                endpoint,
                status = %response.status,
                results = response.results.len(),
                has_next_page = response.next_page_token.is_some(),
                "Places search completed"
            );
            Ok(ResultPage {
                results: response.results.into_iter().map(P::from).collect(),
                next_page_token: response.next_page_token,
                status: response.status,
            })
        }
        _ => Err(upstream_error(endpoint, response.status, response.error_message)),
    }
}

fn upstream_error(endpoint: &str, status: String, message: Option<String>) -> PlacesError {
    warn!(
        endpoint,
        status = %status,
        error_message = ?message,
        "Google Places returned a non-success status"
    );
    PlacesError::Upstream { status, message }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn validate_coordinates(lat: f64, lng: f64) -> Result<(), PlacesError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(PlacesError::validation("Latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(PlacesError::validation("Longitude must be between -180 and 180"));
    }
    Ok(())
}

fn validate_radius(radius: u32) -> Result<u32, PlacesError> {
    if radius == 0 {
        return Err(PlacesError::validation("Radius must be greater than 0"));
    }
    Ok(radius)
}
