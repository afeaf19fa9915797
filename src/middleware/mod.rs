//! Custom middleware implementations for the API.
//!
//! Request IDs and request logging, security headers, and request metrics.

pub mod metrics;
pub mod request_id;
pub mod security;

pub use metrics::*;
pub use request_id::*;
pub use security::*;
