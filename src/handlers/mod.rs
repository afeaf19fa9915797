//! HTTP request handlers for API endpoints.
//!
//! `places` holds the gateway endpoints; the rest are operational
//! endpoints and the app factory.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod places;
pub mod version;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use places::*;
pub use version::*;
