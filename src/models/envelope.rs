//! The uniform `{success, ...}` wrapper around every places response.

use serde::{Deserialize, Serialize};

/// Successful response: `success: true` followed by the payload's own fields
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failed response; never carries `results` or `result`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    /// Provider status literal, present for upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Provider error text or redacted diagnostic detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status: None,
            error: None,
        }
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultPage, PlaceSummary};
    use serde_json::json;

    #[test]
    fn test_success_envelope_flattens_payload() {
        let page: ResultPage<PlaceSummary> = ResultPage {
            results: vec![],
            next_page_token: None,
            status: "ZERO_RESULTS".to_string(),
        };

        let value = serde_json::to_value(SuccessEnvelope::new(page)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "results": [],
                "next_page_token": null,
                "status": "ZERO_RESULTS"
            })
        );
    }

    #[test]
    fn test_error_envelope_omits_empty_fields() {
        let value = serde_json::to_value(ErrorEnvelope::new("Place ID parameter is required")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "message": "Place ID parameter is required"})
        );

        let value = serde_json::to_value(
            ErrorEnvelope::new("Google Places API error: REQUEST_DENIED")
                .with_status(Some("REQUEST_DENIED".to_string()))
                .with_error(Some("The provided API key is invalid.".to_string())),
        )
        .unwrap();
        assert_eq!(value["status"], "REQUEST_DENIED");
        assert_eq!(value["error"], "The provided API key is invalid.");
        assert!(value.get("results").is_none());
    }
}
