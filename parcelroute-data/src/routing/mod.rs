//! Road routing over HTTP.
//!
//! [`HttpRouteProvider`] implements [`parcelroute_core::RouteProvider`]
//! against the OpenRouteService directions API. Any failure it reports is
//! answered by the core resolver with a straight-line estimate.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use parcelroute_core::{GeoPoint, RouteResolver, Tariff, VehicleClass};
//! use parcelroute_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//!
//! let config = HttpRouteProviderConfig::new("http://localhost:8080/ors")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let resolver = RouteResolver::new(HttpRouteProvider::with_config(config)?, Tariff::default());
//!
//! let route = resolver.resolve(
//!     &GeoPoint::new(0.3476, 32.5825)?,
//!     &GeoPoint::new(0.35, 32.60)?,
//!     VehicleClass::Motorcycle,
//! );
//! println!("{} UGX ({:?})", route.cost_estimate, route.source);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ors;
mod provider;

pub use provider::{
    DEFAULT_CAR_PROFILE, DEFAULT_MOTORCYCLE_PROFILE, DEFAULT_ROUTING_BASE_URL, HttpRouteProvider,
    HttpRouteProviderConfig,
};
