//! Google Places wire format and its projection onto the client models.
//!
//! Every field is defaulted so a sparse provider record still parses; the
//! `From` impls decide what an absent field looks like to clients.

use crate::models::{
    AttributedPhoto, Location, NearbyPlace, OpenNow, OpeningHours, Photo, PlaceDetail,
    PlaceSummary, Review,
};
use serde::Deserialize;
use serde_json::Value;

/// Text search and nearby search response
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<ProviderPlace>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// Place details response
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    pub result: Option<ProviderPlace>,
    pub error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProviderPlace {
    place_id: String,
    name: String,
    formatted_address: Option<String>,
    vicinity: Option<String>,
    geometry: Option<Geometry>,
    types: Vec<String>,
    business_status: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    price_level: Option<u8>,
    photos: Vec<ProviderPhoto>,
    opening_hours: Option<ProviderOpeningHours>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    address_components: Option<Value>,
    reviews: Vec<ProviderReview>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderPhoto {
    photo_reference: String,
    height: u32,
    width: u32,
    html_attributions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderOpeningHours {
    open_now: bool,
    periods: Option<Value>,
    weekday_text: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderReview {
    author_name: String,
    author_url: Option<String>,
    language: Option<String>,
    profile_photo_url: Option<String>,
    rating: Option<f64>,
    relative_time_description: String,
    text: String,
    time: i64,
}

impl ProviderPlace {
    fn location(&self) -> Option<Location> {
        self.geometry
            .as_ref()
            .and_then(|g| g.location.as_ref())
            .map(|l| Location {
                lat: l.lat,
                lng: l.lng,
            })
    }

    fn open_now(&self) -> Option<OpenNow> {
        self.opening_hours.as_ref().map(|h| OpenNow {
            open_now: h.open_now,
        })
    }

    fn summary_photos(&self) -> Vec<Photo> {
        self.photos
            .iter()
            .map(|p| Photo {
                photo_reference: p.photo_reference.clone(),
                height: p.height,
                width: p.width,
            })
            .collect()
    }
}

impl From<ProviderPlace> for PlaceSummary {
    fn from(place: ProviderPlace) -> Self {
        let location = place.location();
        let opening_hours = place.open_now();
        let photos = place.summary_photos();

        PlaceSummary {
            place_id: place.place_id,
            name: place.name,
            formatted_address: place.formatted_address,
            location,
            types: place.types,
            business_status: place.business_status,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            price_level: place.price_level,
            photos,
            opening_hours,
        }
    }
}

impl From<ProviderPlace> for NearbyPlace {
    fn from(place: ProviderPlace) -> Self {
        let location = place.location();
        let opening_hours = place.open_now();
        let photos = place.summary_photos();

        NearbyPlace {
            place_id: place.place_id,
            name: place.name,
            vicinity: place.vicinity,
            location,
            types: place.types,
            business_status: place.business_status,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            price_level: place.price_level,
            photos,
            opening_hours,
        }
    }
}

impl From<ProviderPlace> for PlaceDetail {
    fn from(place: ProviderPlace) -> Self {
        let location = place.location();

        PlaceDetail {
            place_id: place.place_id,
            name: place.name,
            formatted_address: place.formatted_address,
            formatted_phone_number: place.formatted_phone_number,
            website: place.website,
            location,
            types: place.types,
            address_components: place
                .address_components
                .unwrap_or_else(|| Value::Array(Vec::new())),
            business_status: place.business_status,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            price_level: place.price_level,
            opening_hours: place.opening_hours.map(|h| OpeningHours {
                open_now: h.open_now,
                periods: h.periods.unwrap_or_else(|| Value::Array(Vec::new())),
                weekday_text: h.weekday_text,
            }),
            photos: place
                .photos
                .into_iter()
                .map(|p| AttributedPhoto {
                    photo_reference: p.photo_reference,
                    height: p.height,
                    width: p.width,
                    html_attributions: p.html_attributions,
                })
                .collect(),
            reviews: place
                .reviews
                .into_iter()
                .map(|r| Review {
                    author_name: r.author_name,
                    author_url: r.author_url,
                    language: r.language,
                    profile_photo_url: r.profile_photo_url,
                    rating: r.rating,
                    relative_time_description: r.relative_time_description,
                    text: r.text,
                    time: r.time,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn place(value: Value) -> ProviderPlace {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_summary_projection() {
        let raw = place(json!({
            "place_id": "ChIJN1t_tDeuEmsRUsoyG83frY4",
            "name": "Joe's Pizza",
            "formatted_address": "7 Carmine St, New York, NY 10014",
            "geometry": {
                "location": {"lat": 40.7306, "lng": -74.0023},
                "viewport": {"northeast": {"lat": 40.73, "lng": -74.0}}
            },
            "types": ["restaurant", "food", "point_of_interest"],
            "business_status": "OPERATIONAL",
            "rating": 4.5,
            "user_ratings_total": 12034,
            "price_level": 1,
            "photos": [{
                "photo_reference": "AWU5eFh",
                "height": 3024,
                "width": 4032,
                "html_attributions": ["<a href=\"https://maps.google.com\">A Diner</a>"]
            }],
            "opening_hours": {"open_now": true},
            "plus_code": {"compound_code": "P2J2+6V New York"}
        }));

        let summary = PlaceSummary::from(raw);
        assert_eq!(summary.name, "Joe's Pizza");
        assert_eq!(
            summary.location,
            Some(Location {
                lat: 40.7306,
                lng: -74.0023
            })
        );
        assert_eq!(summary.types, vec!["restaurant", "food", "point_of_interest"]);
        assert_eq!(summary.price_level, Some(1));
        assert_eq!(
            summary.photos,
            vec![Photo {
                photo_reference: "AWU5eFh".to_string(),
                height: 3024,
                width: 4032,
            }]
        );
        assert_eq!(summary.opening_hours, Some(OpenNow { open_now: true }));

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["location"]["lat"].is_number());
        assert!(value["location"]["lng"].is_number());
        assert!(value.get("plus_code").is_none());
        assert!(value["photos"][0].get("html_attributions").is_none());
    }

    #[test]
    fn test_sparse_record_gets_nulls_and_empty_lists() {
        let summary = PlaceSummary::from(place(json!({"place_id": "abc", "name": "Corner Shop"})));
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["photos"], json!([]));
        assert_eq!(value["types"], json!([]));
        assert!(value["opening_hours"].is_null());
        assert!(value["location"].is_null());
        assert!(value["rating"].is_null());
        assert!(value["user_ratings_total"].is_null());
        assert!(value["price_level"].is_null());
    }

    #[test]
    fn test_opening_hours_without_open_now() {
        let summary = PlaceSummary::from(place(json!({"opening_hours": {}})));
        assert_eq!(summary.opening_hours, Some(OpenNow { open_now: false }));
    }

    #[test]
    fn test_nearby_uses_vicinity() {
        let nearby = NearbyPlace::from(place(json!({
            "place_id": "xyz",
            "name": "Vet Cafe",
            "vicinity": "12 Main St, Springfield",
            "formatted_address": "12 Main St, Springfield, IL 62701, USA"
        })));

        assert_eq!(nearby.vicinity.as_deref(), Some("12 Main St, Springfield"));
        let value = serde_json::to_value(&nearby).unwrap();
        assert!(value.get("formatted_address").is_none());
    }

    #[test]
    fn test_detail_projection() {
        let detail = PlaceDetail::from(place(json!({
            "place_id": "det1",
            "name": "Hometown Hardware",
            "formatted_phone_number": "(555) 010-2000",
            "website": "https://hometown.example",
            "address_components": [{"long_name": "Springfield", "types": ["locality"]}],
            "opening_hours": {
                "open_now": false,
                "periods": [{"open": {"day": 1, "time": "0900"}}],
                "weekday_text": ["Monday: 9:00 AM – 5:00 PM"]
            },
            "photos": [{"photo_reference": "p1", "height": 10, "width": 20, "html_attributions": ["Jane"]}],
            "reviews": [{
                "author_name": "Sam",
                "language": "en",
                "rating": 5,
                "relative_time_description": "a week ago",
                "text": "Veteran owned, great service",
                "time": 1700000000
            }]
        })));

        assert_eq!(detail.address_components[0]["long_name"], "Springfield");
        let hours = detail.opening_hours.unwrap();
        assert!(!hours.open_now);
        assert_eq!(hours.periods[0]["open"]["time"], "0900");
        assert_eq!(hours.weekday_text.len(), 1);
        assert_eq!(detail.photos[0].html_attributions, vec!["Jane"]);
        assert_eq!(detail.reviews[0].rating, Some(5.0));
        assert!(detail.reviews[0].author_url.is_none());
    }

    #[test]
    fn test_detail_defaults() {
        let detail = PlaceDetail::from(place(json!({"place_id": "det2", "name": "Bare"})));
        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["reviews"], json!([]));
        assert_eq!(value["photos"], json!([]));
        assert_eq!(value["address_components"], json!([]));
        assert!(value["opening_hours"].is_null());
        assert!(value["website"].is_null());
    }

    #[test]
    fn test_search_response_without_results_key() {
        let response: SearchResponse =
            serde_json::from_value(json!({"status": "ZERO_RESULTS"})).unwrap();
        assert!(response.results.is_empty());
        assert!(response.next_page_token.is_none());
    }
}
