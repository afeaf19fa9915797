//! Request and response models for the places endpoints.
//!
//! Outbound types are the stable, minimal projection of the provider's
//! schema. Optional provider fields serialize as `null` and absent
//! collections as `[]`, never as missing keys.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Radius applied to text search when coordinates are supplied
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 50_000;

/// Radius applied to nearby search when none is supplied
pub const DEFAULT_NEARBY_RADIUS_METERS: u32 = 1_500;

/// Query parameters for `GET /api/places`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct SearchQuery {
    /// Free-text search, e.g. "pizza near Brooklyn"
    pub query: Option<String>,
    /// Latitude used to bias results; requires `longitude`
    pub latitude: Option<f64>,
    /// Longitude used to bias results; requires `latitude`
    pub longitude: Option<f64>,
    /// Bias radius in meters (default 50000)
    pub radius: Option<u32>,
    /// Provider category filter, e.g. "restaurant"
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    /// Cursor from a previous page's `next_page_token`
    #[serde(rename = "pagetoken")]
    pub page_token: Option<String>,
}

/// JSON body for `POST /api/places`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct NearbyRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Search radius in meters (default 1500)
    pub radius: Option<u32>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub keyword: Option<String>,
    #[serde(rename = "pagetoken")]
    pub page_token: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub photo_reference: String,
    pub height: u32,
    pub width: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenNow {
    pub open_now: bool,
}

/// One text-search hit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: Option<Location>,
    pub types: Vec<String>,
    pub business_status: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub photos: Vec<Photo>,
    pub opening_hours: Option<OpenNow>,
}

/// One nearby-search hit; carries `vicinity` instead of a full address
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    pub vicinity: Option<String>,
    pub location: Option<Location>,
    pub types: Vec<String>,
    pub business_status: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub photos: Vec<Photo>,
    pub opening_hours: Option<OpenNow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributedPhoto {
    pub photo_reference: String,
    pub height: u32,
    pub width: u32,
    pub html_attributions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_now: bool,
    /// Provider period objects, passed through untouched
    pub periods: Value,
    pub weekday_text: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,
    pub author_url: Option<String>,
    pub language: Option<String>,
    pub profile_photo_url: Option<String>,
    pub rating: Option<f64>,
    pub relative_time_description: String,
    pub text: String,
    pub time: i64,
}

/// Full record returned by the details endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub location: Option<Location>,
    pub types: Vec<String>,
    /// Provider address components, passed through untouched
    pub address_components: Value,
    pub business_status: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub opening_hours: Option<OpeningHours>,
    pub photos: Vec<AttributedPhoto>,
    pub reviews: Vec<Review>,
}

/// A page of search results plus the provider's cursor and status
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<P> {
    pub results: Vec<P>,
    pub next_page_token: Option<String>,
    pub status: String,
}

pub type SearchResultPage = ResultPage<PlaceSummary>;
pub type NearbyResultPage = ResultPage<NearbyPlace>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailResult {
    pub result: PlaceDetail,
    pub status: String,
}
