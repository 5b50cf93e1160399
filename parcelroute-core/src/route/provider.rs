//! Routing provider trait and the raw path it returns.

use geo::LineString;

use crate::{GeoPoint, VehicleClass};

use super::error::RoutingError;

/// A path as reported by a routing service, before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPath {
    /// Total distance in metres.
    pub distance_m: f64,
    /// Total travel time in seconds.
    pub duration_s: f64,
    /// Path geometry, longitude as `x`.
    pub geometry: LineString<f64>,
}

/// Fetch a road-following path between two points.
///
/// Implementations pick a vehicle-appropriate profile from `vehicle`.
///
/// # Examples
///
/// ```
/// use geo::LineString;
/// use parcelroute_core::{GeoPoint, RouteProvider, RoutedPath, RoutingError, VehicleClass};
///
/// struct Unreachable;
///
/// impl RouteProvider for Unreachable {
///     fn directions(
///         &self,
///         _from: &GeoPoint,
///         _to: &GeoPoint,
///         _vehicle: VehicleClass,
///     ) -> Result<RoutedPath, RoutingError> {
///         Err(RoutingError::EmptyRoute)
///     }
/// }
///
/// let from = GeoPoint::unchecked(0.3476, 32.5825);
/// let to = GeoPoint::unchecked(0.35, 32.6);
/// assert!(Unreachable.directions(&from, &to, VehicleClass::Car).is_err());
/// ```
pub trait RouteProvider {
    /// Return the path from `from` to `to` for `vehicle`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] on transport failure, non-success responses or
    /// malformed payloads.
    fn directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        vehicle: VehicleClass,
    ) -> Result<RoutedPath, RoutingError>;
}

impl<P: RouteProvider + ?Sized> RouteProvider for Box<P> {
    fn directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        vehicle: VehicleClass,
    ) -> Result<RoutedPath, RoutingError> {
        (**self).directions(from, to, vehicle)
    }
}
