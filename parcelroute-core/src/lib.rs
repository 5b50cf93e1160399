//! Core domain for the parcelroute delivery estimator.
//!
//! The crate turns two confirmed locations and a vehicle class into a route
//! and price quote. Points are gated by a country [`Boundary`], routes come
//! from a [`RouteProvider`] with a straight-line fallback, and a [`Session`]
//! owns the state of one delivery form. Nothing here performs I/O; network
//! adapters live in `parcelroute-data`.

#![forbid(unsafe_code)]

pub mod boundary;
pub mod device;
pub mod distance;
pub mod geocode;
pub mod location;
pub mod point;
pub mod pricing;
pub mod request;
pub mod route;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod view;

pub use boundary::{
    Boundary, BoundingRegion, BoundingRegionError, DEFAULT_COUNTRY_NAME, OutOfBoundsError,
    PolygonBoundary, contains,
};
pub use device::{
    BoundedLocator, DEFAULT_LOCATE_TIMEOUT, DeviceLocationError, DeviceLocator, NoDeviceLocator,
};
pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use geocode::{Address, AddressLookup, AddressResolver, GeocodingError, NoGeocoder, ReverseGeocoder};
pub use location::{LocationEntry, LocationRole, LocationStore};
pub use point::{GeoPoint, GeoPointError};
pub use pricing::{
    BASE_FEE, CAR_RATE_PER_KM, MOTORCYCLE_RATE_PER_KM, ParseVehicleClassError, Tariff,
    VehicleClass, estimate_cost,
};
pub use request::{
    ContactDetails, DeliveryDetails, DeliveryRequest, SubmissionError, SubmissionReceipt,
    SubmissionTarget,
};
pub use route::{
    FALLBACK_MINUTES_PER_KM, RouteProvider, RouteResolver, RouteResult, RouteSource, RoutedPath,
    RoutingError,
};
pub use session::{
    PointOrigin, PreconditionError, RouteApplication, RouteTicket, Session, SessionConfig,
    SessionError, SessionEvent, SessionOutcome,
};
pub use view::{NullRouteView, RouteView};
