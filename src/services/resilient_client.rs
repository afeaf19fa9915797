//! Resilient HTTP client for calls to the upstream places provider.
//!
//! This module provides a configurable HTTP client that implements:
//! - Enforced connect and overall request timeouts
//! - Opt-in bounded retries with exponential backoff and jitter
//! - Structured logging with credentials scrubbed from every URL
//! - Prometheus metrics per upstream endpoint
//!
//! The client holds no per-destination state, so one instance can be shared
//! by every in-flight request.

use crate::telemetry::redact_credentials;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{error, info, warn};
use url::Url;

/// Configuration for resilient HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResilientClientConfig {
    /// Upper bound on a single request attempt, connect through body (in seconds)
    pub timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Retry configuration
    pub retry: RetryConfig,

    /// Enable detailed logging
    pub enable_detailed_logging: bool,
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retries after the first attempt; 0 disables retrying
    pub max_attempts: usize,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: u64,

    /// Retry on these HTTP status codes
    pub retry_on_status: Vec<u16>,
}

impl Default for ResilientClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            connect_timeout_seconds: 3,
            retry: RetryConfig::default(),
            enable_detailed_logging: true,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Delays before each retry, without jitter: `initial_delay_ms`, then
    /// doubling, capped at `max_delay_ms`, `max_attempts` entries long
    pub fn backoff(&self) -> impl Iterator<Item = Duration> + use<> {
        // ExponentialBackoff yields base^n * factor; base 2 with half the
        // initial delay as factor starts at `initial_delay_ms` (rounded down to even)
        ExponentialBackoff::from_millis(2)
            .factor(self.initial_delay_ms.max(2) / 2)
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .take(self.max_attempts)
    }
}

/// Metrics for outbound provider calls
#[derive(Clone)]
pub struct ResilientClientMetrics {
    /// Requests by upstream endpoint and outcome
    pub requests_total: CounterVec,

    /// Request duration by upstream endpoint
    pub request_duration_seconds: HistogramVec,

    /// Timeout occurrences by upstream endpoint
    pub timeouts_total: CounterVec,
}

impl ResilientClientMetrics {
    /// Create the outbound metrics and register them on `registry`
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "places_upstream_requests_total",
                "Total upstream places requests by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "places_upstream_request_duration_seconds",
                "Duration of upstream places requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["endpoint"],
        )?;

        let timeouts_total = CounterVec::new(
            Opts::new(
                "places_upstream_timeouts_total",
                "Total upstream places timeouts by endpoint",
            ),
            &["endpoint"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(timeouts_total.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
            timeouts_total,
        })
    }
}

/// Resilient HTTP client with timeouts and bounded retries
#[derive(Clone)]
pub struct ResilientClient {
    client: Client,
    config: ResilientClientConfig,
    metrics: Option<ResilientClientMetrics>,
}

impl ResilientClient {
    /// Create a new resilient HTTP client
    pub fn new(
        config: ResilientClientConfig,
        metrics: Option<ResilientClientMetrics>,
    ) -> Result<Self, ResilientClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| ResilientClientError::NetworkError(e.without_url()))?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    /// Execute an HTTP GET request
    ///
    /// `endpoint` is a short label ("textsearch", "details", ...) used for
    /// metrics; `url` may carry a credential and is only ever logged redacted.
    pub async fn get(
        &self,
        endpoint: &str,
        url: &Url,
    ) -> Result<reqwest::Response, ResilientClientError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResilientClientError::InvalidUrl(redact_credentials(
                url.as_str(),
            )));
        }

        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let retry_strategy = self.config.retry.backoff().map(jitter);

        let log_url = redact_credentials(url.as_str());
        let destination = url.host_str().unwrap_or("unknown").to_string();
        let started = Instant::now();

        let result = Retry::start(retry_strategy, || {
            self.attempt(url, timeout, &destination, &log_url)
        })
        .await;

        self.record(endpoint, &result, started.elapsed());
        result
    }

    async fn attempt(
        &self,
        url: &Url,
        timeout: Duration,
        destination: &str,
        log_url: &str,
    ) -> Result<reqwest::Response, ResilientClientError> {
        let start = Instant::now();
        let detailed = self.config.enable_detailed_logging;

        match tokio::time::timeout(timeout, self.client.get(url.clone()).send()).await {
            Ok(Ok(response)) => {
                let status = response.status().as_u16();
                let duration_ms = start.elapsed().as_millis();

                if self.config.retry.retry_on_status.contains(&status) {
                    if detailed {
                        warn!(
                            destination = %destination,
                            url = %log_url,
                            status,
                            duration_ms,
                            "Upstream request failed with retryable status"
                        );
                    }
                    return Err(ResilientClientError::RetryableStatus(status));
                }

                if detailed {
                    info!(
                        destination = %destination,
                        url = %log_url,
                        status,
                        duration_ms,
                        "Upstream request completed"
                    );
                }
                Ok(response)
            }
            Ok(Err(e)) => {
                let e = e.without_url();
                if detailed {
                    error!(
                        destination = %destination,
                        url = %log_url,
                        error = %e,
                        duration_ms = start.elapsed().as_millis(),
                        "Upstream request failed with network error"
                    );
                }
                if e.is_timeout() {
                    Err(ResilientClientError::Timeout)
                } else {
                    Err(ResilientClientError::NetworkError(e))
                }
            }
            Err(_) => {
                if detailed {
                    warn!(
                        destination = %destination,
                        url = %log_url,
                        timeout_seconds = timeout.as_secs(),
                        "Upstream request timed out"
                    );
                }
                Err(ResilientClientError::Timeout)
            }
        }
    }

    fn record(
        &self,
        endpoint: &str,
        result: &Result<reqwest::Response, ResilientClientError>,
        duration: Duration,
    ) {
        let Some(metrics) = &self.metrics else {
            return;
        };

        let outcome = match result {
            Ok(_) => "success",
            Err(ResilientClientError::Timeout) => {
                metrics.timeouts_total.with_label_values(&[endpoint]).inc();
                "timeout"
            }
            Err(ResilientClientError::RetryableStatus(_)) => "retry_exhausted",
            Err(ResilientClientError::NetworkError(_)) => "network_error",
            Err(ResilientClientError::InvalidUrl(_)) => "error",
        };

        metrics
            .requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();
        metrics
            .request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration.as_secs_f64());
    }
}

/// Errors that can occur with the resilient client
#[derive(Debug, thiserror::Error)]
pub enum ResilientClientError {
    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Retryable status code: {0}")]
    RetryableStatus(u16),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl ResilientClientError {
    /// Get a user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            ResilientClientError::NetworkError(_) => {
                "Places provider temporarily unavailable due to network issues".to_string()
            }
            ResilientClientError::Timeout => {
                "Places provider temporarily unavailable due to timeout".to_string()
            }
            ResilientClientError::RetryableStatus(status) => {
                format!("Places provider returned error status {status}, please try again")
            }
            ResilientClientError::InvalidUrl(_) => {
                "Places provider endpoint is misconfigured".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ResilientClientConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.connect_timeout_seconds, 3);
        assert_eq!(config.retry.max_attempts, 0);
        assert!(config.enable_detailed_logging);
    }

    #[test]
    fn test_backoff_starts_at_initial_delay_and_doubles() {
        let retry = RetryConfig {
            max_attempts: 4,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            ..RetryConfig::default()
        };
        let delays: Vec<u64> = retry.backoff().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![100, 200, 400, 800]);

        let capped = RetryConfig {
            max_delay_ms: 300,
            ..retry
        };
        let delays: Vec<u64> = capped.backoff().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![100, 200, 300, 300]);
    }

    #[test]
    fn test_backoff_is_empty_when_retries_disabled() {
        assert_eq!(RetryConfig::default().backoff().count(), 0);
    }

    #[test]
    fn test_metrics_registration_is_exclusive() {
        let registry = Registry::new();
        assert!(ResilientClientMetrics::new(&registry).is_ok());
        // Same names on the same registry collide
        assert!(ResilientClientMetrics::new(&registry).is_err());
    }

    #[test]
    fn test_error_user_messages() {
        assert!(ResilientClientError::Timeout.user_message().contains("timeout"));
        assert!(
            ResilientClientError::RetryableStatus(503)
                .user_message()
                .contains("503")
        );
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let client = ResilientClient::new(ResilientClientConfig::default(), None).unwrap();
        let url = Url::parse("ftp://example.com/place?key=secret").unwrap();

        let err = client.get("textsearch", &url).await.unwrap_err();
        assert!(matches!(err, ResilientClientError::InvalidUrl(_)));
        assert!(!err.to_string().contains("secret"));
    }
}
