//! Network adapters for the parcelroute delivery estimator.
//!
//! Responsibilities:
//! - Implement the `parcelroute-core` collaborator traits over HTTP.
//! - Own wire formats for the routing, geocoding and form services.
//!
//! Boundaries:
//! - Do not encode pricing or validation rules (live in `parcelroute-core`).
//! - Present synchronous traits; async I/O stays inside each adapter.
//!
//! Invariants:
//! - Adapters never panic on malformed responses; they return typed errors.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod blocking;
mod error;
pub mod geocoding;
pub mod routing;
pub mod submission;

pub use error::ProviderBuildError;
pub use geocoding::{HttpReverseGeocoder, HttpReverseGeocoderConfig};
pub use routing::{HttpRouteProvider, HttpRouteProviderConfig};
pub use submission::{HttpSubmissionTarget, HttpSubmissionTargetConfig};

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = concat!("parcelroute/", env!("CARGO_PKG_VERSION"));
