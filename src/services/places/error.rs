//! Failure kinds of the places gateway and their envelope rendering.

use crate::{
    models::ErrorEnvelope, services::resilient_client::ResilientClientError,
    telemetry::redact_credentials,
};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

/// Client-facing message for transport, parse and other unexpected failures
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while contacting Google Places";

/// Everything that can stop a places request from succeeding
///
/// Each variant maps to one HTTP status and one envelope shape, and every
/// variant is raised at the operation boundary, so nothing escapes as an
/// unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// Missing or malformed input, detected before any outbound call
    #[error("{0}")]
    Validation(String),

    /// No provider credential configured, detected before any outbound call
    #[error("Google Places API key is not configured")]
    MissingCredential,

    #[error("Method not supported")]
    MethodNotSupported,

    /// Provider answered with a status other than OK/ZERO_RESULTS
    #[error("Google Places API error: {status}")]
    Upstream {
        status: String,
        message: Option<String>,
    },

    /// The outbound call itself failed (network, timeout, retryable status)
    #[error("Upstream request failed: {0}")]
    Transport(#[from] ResilientClientError),

    /// Anything else: unparseable payloads, bad base URL, odd HTTP statuses
    #[error("{0}")]
    Internal(String),
}

impl PlacesError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlacesError::Validation(message.into())
    }

    /// Label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            PlacesError::Validation(_) => "validation",
            PlacesError::MissingCredential => "configuration",
            PlacesError::MethodNotSupported => "method_not_supported",
            PlacesError::Upstream { .. } => "upstream",
            PlacesError::Transport(_) => "transport",
            PlacesError::Internal(_) => "internal",
        }
    }

    /// Render the failure body sent to the client
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            PlacesError::Validation(message) => ErrorEnvelope::new(message.clone()),
            PlacesError::MissingCredential | PlacesError::MethodNotSupported => {
                ErrorEnvelope::new(self.to_string())
            }
            PlacesError::Upstream { status, message } => ErrorEnvelope::new(self.to_string())
                .with_status(Some(status.clone()))
                .with_error(message.clone()),
            PlacesError::Transport(e) => ErrorEnvelope::new(UNEXPECTED_ERROR_MESSAGE)
                .with_error(Some(redact_credentials(&format!(
                    "{}: {e}",
                    e.user_message()
                )))),
            PlacesError::Internal(detail) => ErrorEnvelope::new(UNEXPECTED_ERROR_MESSAGE)
                .with_error(Some(redact_credentials(detail))),
        }
    }
}

impl ResponseError for PlacesError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::Validation(_) | PlacesError::Upstream { .. } => StatusCode::BAD_REQUEST,
            PlacesError::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            PlacesError::MissingCredential
            | PlacesError::Transport(_)
            | PlacesError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}
