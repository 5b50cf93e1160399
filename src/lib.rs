//! Facade crate for the parcelroute delivery estimator.
//!
//! This crate re-exports the core domain types and exposes the HTTP adapters
//! behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use parcelroute_core::{
    Address, AddressLookup, AddressResolver, Boundary, BoundingRegion, DEFAULT_COUNTRY_NAME,
    DeliveryDetails, DeliveryRequest, DeviceLocator, GeoPoint, GeoPointError, GeocodingError,
    LocationRole, OutOfBoundsError, PointOrigin, PreconditionError, ReverseGeocoder,
    RouteProvider, RouteResolver, RouteResult, RouteSource, RouteView, RoutingError, Session,
    SessionConfig, SessionError, SessionEvent, SessionOutcome, SubmissionError,
    SubmissionReceipt, SubmissionTarget, Tariff, VehicleClass, distance_km, estimate_cost,
};

#[cfg(feature = "http")]
pub use parcelroute_data::{
    HttpReverseGeocoder, HttpReverseGeocoderConfig, HttpRouteProvider, HttpRouteProviderConfig,
    HttpSubmissionTarget, HttpSubmissionTargetConfig, ProviderBuildError,
};
