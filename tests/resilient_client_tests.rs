//! Integration tests for the resilient HTTP client
//!
//! Exercises timeouts, bounded retries and metrics against a wiremock server.

use places_gateway::{
    ResilientClient, ResilientClientConfig, ResilientClientError, ResilientClientMetrics,
    RetryConfig,
};
use prometheus::{Registry, TextEncoder};
use std::time::Duration;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn config(timeout_seconds: u64, max_attempts: usize) -> ResilientClientConfig {
    ResilientClientConfig {
        timeout_seconds,
        retry: RetryConfig {
            max_attempts,
            initial_delay_ms: 1,
            max_delay_ms: 10,
            ..RetryConfig::default()
        },
        ..ResilientClientConfig::default()
    }
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}?query=pizza&key=super-secret", server.uri())).unwrap()
}

fn render(registry: &Registry) -> String {
    TextEncoder::new().encode_to_string(&registry.gather()).unwrap()
}

#[tokio::test]
async fn test_successful_request_is_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let registry = Registry::new();
    let metrics = ResilientClientMetrics::new(&registry).expect("Failed to create metrics");
    let client = ResilientClient::new(config(5, 0), Some(metrics)).expect("Failed to create client");

    let response = client
        .get("textsearch", &url(&server, "/textsearch/json"))
        .await
        .expect("Request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let output = render(&registry);
    assert!(output.contains(r#"places_upstream_requests_total{endpoint="textsearch",outcome="success"} 1"#));
    assert!(output.contains("places_upstream_request_duration_seconds"));
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = ResilientClient::new(ResilientClientConfig::default(), None).unwrap();
    let err = client
        .get("details", &url(&server, "/details/json"))
        .await
        .unwrap_err();

    assert!(matches!(err, ResilientClientError::RetryableStatus(503)));
}

#[tokio::test]
async fn test_retries_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ResilientClient::new(config(5, 3), None).unwrap();
    let response = client
        .get("textsearch", &url(&server, "/textsearch/json"))
        .await
        .expect("Third attempt should succeed");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let registry = Registry::new();
    let metrics = ResilientClientMetrics::new(&registry).unwrap();
    let client = ResilientClient::new(config(5, 2), Some(metrics)).unwrap();

    let err = client
        .get("nearbysearch", &url(&server, "/nearbysearch/json"))
        .await
        .unwrap_err();

    assert!(matches!(err, ResilientClientError::RetryableStatus(429)));
    assert!(render(&registry).contains(r#"outcome="retry_exhausted""#));
}

#[tokio::test]
async fn test_non_retryable_status_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = ResilientClient::new(config(5, 3), None).unwrap();
    let response = client
        .get("details", &url(&server, "/details/json"))
        .await
        .expect("404 is handed back to the caller");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let registry = Registry::new();
    let metrics = ResilientClientMetrics::new(&registry).unwrap();
    let client = ResilientClient::new(config(1, 0), Some(metrics)).unwrap();

    let err = client
        .get("textsearch", &url(&server, "/textsearch/json"))
        .await
        .unwrap_err();

    assert!(matches!(err, ResilientClientError::Timeout));
    assert!(!err.to_string().contains("super-secret"));
    assert!(render(&registry).contains(r#"places_upstream_timeouts_total{endpoint="textsearch"} 1"#));
}

#[tokio::test]
async fn test_network_error_hides_credential() {
    // Nothing listens on the discard port
    let client = ResilientClient::new(config(2, 0), None).unwrap();
    let url = Url::parse("http://127.0.0.1:9/textsearch/json?key=super-secret").unwrap();

    let err = client.get("textsearch", &url).await.unwrap_err();

    assert!(matches!(
        err,
        ResilientClientError::NetworkError(_) | ResilientClientError::Timeout
    ));
    assert!(!err.to_string().contains("super-secret"));
}

#[test]
fn test_retry_status_defaults() {
    let config = ResilientClientConfig::default();
    let retry_statuses = &config.retry.retry_on_status;

    assert!(retry_statuses.contains(&500));
    assert!(retry_statuses.contains(&503));
    assert!(retry_statuses.contains(&429));
    assert!(!retry_statuses.contains(&200));
    assert!(!retry_statuses.contains(&404));
}

#[test]
fn test_resilient_client_config_from_env() {
    unsafe {
        std::env::set_var("RESILIENT_CLIENT_TIMEOUT", "4");
        std::env::set_var("RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS", "2");
        std::env::set_var("RESILIENT_CLIENT_RETRY_ON_STATUS", "502, 503");
    }

    let config = ResilientClientConfig::from_env();
    assert_eq!(config.timeout_seconds, 4);
    assert_eq!(config.retry.max_attempts, 2);
    assert_eq!(config.retry.retry_on_status, vec![502, 503]);

    unsafe {
        std::env::remove_var("RESILIENT_CLIENT_TIMEOUT");
        std::env::remove_var("RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS");
        std::env::remove_var("RESILIENT_CLIENT_RETRY_ON_STATUS");
    }
}
