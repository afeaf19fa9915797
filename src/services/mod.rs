//! Business logic and service layer modules.
//!
//! `places` is the gateway to the Google Places web service; it reaches the
//! provider through `resilient_client`. `metrics` owns the Prometheus
//! registry both of them report into.

pub mod metrics;
pub mod places;
pub mod resilient_client;

pub use metrics::*;
pub use places::{PlacesError, PlacesService};
pub use resilient_client::{
    ResilientClient, ResilientClientConfig, ResilientClientError, ResilientClientMetrics,
    RetryConfig,
};
