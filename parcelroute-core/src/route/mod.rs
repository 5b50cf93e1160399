//! Resolve a delivery route and its quote between two points.
//!
//! A [`RouteProvider`] supplies road-following paths. [`RouteResolver`]
//! wraps a provider and always produces a [`RouteResult`]: when the provider
//! fails the resolver degrades to a straight-line estimate and tags the
//! result with [`RouteSource::Fallback`].

mod error;
mod provider;
mod resolver;

use geo::LineString;

pub use error::RoutingError;
pub use provider::{RouteProvider, RoutedPath};
pub use resolver::{FALLBACK_MINUTES_PER_KM, RouteResolver};

/// Where a [`RouteResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RouteSource {
    /// Road-following path returned by the routing service.
    Primary,
    /// Straight-line estimate computed locally after the service failed.
    Fallback,
}

impl RouteSource {
    /// Returns `true` for locally estimated results.
    #[must_use]
    pub const fn is_estimate(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Outcome of one route computation.
///
/// Results are replaced wholesale on every computation, never patched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Travelled distance in kilometres.
    pub distance_km: f64,
    /// Travel time in whole minutes.
    pub duration_min: u32,
    /// Quoted price in currency units.
    pub cost_estimate: u64,
    /// Path to draw, longitude as `x`.
    pub geometry: LineString<f64>,
    /// Whether the result was routed or estimated.
    pub source: RouteSource,
}
