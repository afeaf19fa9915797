//! Data models for the places gateway.
//!
//! Inbound query/body types, the normalized place shapes handed to clients,
//! and the `{success, ...}` envelopes wrapping every places response.

pub mod api;
pub mod envelope;
pub mod places;

pub use api::*;
pub use envelope::*;
pub use places::*;
