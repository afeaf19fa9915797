//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label for a request's route, suitable as a metrics dimension
///
/// Matched requests report their resource pattern (`/api/places/details/{place_id}`)
/// so path parameters do not create one series per place. Unmatched requests
/// collapse into a single `/unmatched` label.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "/unmatched".to_string())
}
