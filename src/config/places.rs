//! Google Places provider configuration.

use super::env_string;
use std::fmt;

/// Default endpoint root for the Google Places web service
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Upstream provider settings for the places gateway
#[derive(Clone, Default)]
pub struct PlacesConfig {
    /// Server-held credential sent as the `key` query parameter
    pub api_key: Option<String>,
    /// Endpoint root; `/textsearch/json` etc. are appended to it
    pub base_url: String,
}

impl PlacesConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_key: env_string("GOOGLE_PLACES_API_KEY"),
            base_url: env_string("GOOGLE_PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
        }
    }

    /// Config pointing at `base_url` with the given key, used by tests and tools
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

// Manual impl so the key never ends up in a `{:?}` log line
impl fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}
