//! Log subscriber setup, request log fields and credential redaction.

use crate::config::{LogFormat, ServerConfig};
use crate::utils::{extract_client_ip, extract_user_agent};
use regex::Regex;
use std::sync::LazyLock;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise everything at `info` and above is
/// emitted. Calling this twice is harmless, the second call is ignored.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_ok() {
        tracing::info!(
            service_name = env!("CARGO_PKG_NAME"),
            service_version = env!("CARGO_PKG_VERSION"),
            log_format = ?config.log_format,
            "Tracing initialized"
        );
    }
}

/// Fields attached to the request start/finish log lines
pub struct RequestFields {
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub method: String,
    pub path: String,
}

impl RequestFields {
    pub fn from_request(req: &actix_web::HttpRequest) -> Self {
        Self {
            user_agent: extract_user_agent(req),
            ip_address: extract_client_ip(req),
            method: req.method().to_string(),
            path: req.path().to_string(),
        }
    }
}

// Query parameters that carry provider credentials
static CREDENTIAL_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([?&](?:key|api_key|apikey)=)[^&\s)\x22']*")
        .expect("credential pattern is valid")
});

/// Replace every credential query value in `input` with `[REDACTED]`.
///
/// Applied to URLs before logging and to any diagnostic text that is echoed
/// back to clients.
pub fn redact_credentials(input: &str) -> String {
    CREDENTIAL_PARAM
        .replace_all(input, "${1}[REDACTED]")
        .into_owned()
}
