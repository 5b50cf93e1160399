//! Primary/fallback route resolution.

use geo::{Coord, LineString};
use log::{info, warn};

use crate::{GeoPoint, RouteResult, RouteSource, Tariff, VehicleClass, distance_km};

use super::error::RoutingError;
use super::provider::{RouteProvider, RoutedPath};

/// Minutes per kilometre assumed for straight-line estimates (20 km/h).
pub const FALLBACK_MINUTES_PER_KM: f64 = 3.0;

/// Turns a [`RouteProvider`] into a total route-and-quote function.
///
/// # Examples
///
/// ```
/// use parcelroute_core::{GeoPoint, RouteResolver, RouteSource, Tariff, VehicleClass};
/// use parcelroute_core::test_support::StubRouteProvider;
///
/// let resolver = RouteResolver::new(StubRouteProvider::failing(), Tariff::default());
/// let from = GeoPoint::unchecked(0.3476, 32.5825);
/// let to = GeoPoint::unchecked(0.35, 32.60);
/// let result = resolver.resolve(&from, &to, VehicleClass::Car);
/// assert_eq!(result.source, RouteSource::Fallback);
/// ```
#[derive(Debug, Clone)]
pub struct RouteResolver<P> {
    provider: P,
    tariff: Tariff,
}

impl<P: RouteProvider> RouteResolver<P> {
    /// Wraps `provider`, quoting with `tariff`.
    pub const fn new(provider: P, tariff: Tariff) -> Self {
        Self { provider, tariff }
    }

    /// The tariff used for quotes.
    pub const fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Compute a route and quote from `from` to `to`.
    ///
    /// Never fails: any provider error yields a straight-line estimate tagged
    /// [`RouteSource::Fallback`].
    pub fn resolve(&self, from: &GeoPoint, to: &GeoPoint, vehicle: VehicleClass) -> RouteResult {
        match self
            .provider
            .directions(from, to, vehicle)
            .and_then(check_path)
        {
            Ok(path) => {
                let result = self.primary(path, vehicle);
                info!(
                    "routed {from} -> {to} by {vehicle}: {:.2} km, {} min, cost {}",
                    result.distance_km, result.duration_min, result.cost_estimate
                );
                result
            }
            Err(err) => {
                warn!("routing {from} -> {to} failed, using straight-line estimate: {err}");
                self.fallback(from, to, vehicle)
            }
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "unit conversion from metres and seconds"
    )]
    fn primary(&self, path: RoutedPath, vehicle: VehicleClass) -> RouteResult {
        let distance_km = path.distance_m / 1000.0;
        RouteResult {
            distance_km,
            duration_min: whole_minutes(path.duration_s / 60.0),
            cost_estimate: self.tariff.routed_cost(distance_km, vehicle),
            geometry: path.geometry,
            source: RouteSource::Primary,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "duration estimate scales the distance"
    )]
    fn fallback(&self, from: &GeoPoint, to: &GeoPoint, vehicle: VehicleClass) -> RouteResult {
        let distance_km = distance_km(from, to);
        RouteResult {
            distance_km,
            duration_min: whole_minutes(distance_km * FALLBACK_MINUTES_PER_KM),
            cost_estimate: self.tariff.estimated_cost(distance_km, vehicle),
            geometry: LineString::from(vec![Coord::<f64>::from(*from), Coord::<f64>::from(*to)]),
            source: RouteSource::Fallback,
        }
    }
}

/// Reject paths whose numbers cannot be priced.
fn check_path(path: RoutedPath) -> Result<RoutedPath, RoutingError> {
    let valid = |value: f64| value.is_finite() && value >= 0.0;
    if !valid(path.distance_m) || !valid(path.duration_s) {
        return Err(RoutingError::Parse {
            message: format!(
                "invalid distance {} m or duration {} s",
                path.distance_m, path.duration_s
            ),
        });
    }
    if path.geometry.0.len() < 2 {
        return Err(RoutingError::EmptyRoute);
    }
    Ok(path)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to the u32 range before the cast"
)]
fn whole_minutes(minutes: f64) -> u32 {
    if minutes.is_finite() && minutes > 0.0 {
        minutes.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubRouteProvider;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pickup() -> GeoPoint {
        GeoPoint::unchecked(0.3476, 32.5825)
    }

    #[fixture]
    fn delivery() -> GeoPoint {
        GeoPoint::unchecked(0.35, 32.60)
    }

    fn routed_path(distance_m: f64, duration_s: f64) -> RoutedPath {
        RoutedPath {
            distance_m,
            duration_s,
            geometry: LineString::from(vec![(32.5825, 0.3476), (32.59, 0.349), (32.60, 0.35)]),
        }
    }

    #[rstest]
    fn primary_converts_units_and_rounds_distance_for_pricing(
        pickup: GeoPoint,
        delivery: GeoPoint,
    ) {
        let provider = StubRouteProvider::with_path(routed_path(2_600.0, 389.0));
        let resolver = RouteResolver::new(provider, Tariff::default());

        let result = resolver.resolve(&pickup, &delivery, VehicleClass::Motorcycle);

        assert_eq!(result.source, RouteSource::Primary);
        assert!((result.distance_km - 2.6).abs() < 1e-12);
        assert_eq!(result.duration_min, 6);
        assert_eq!(result.cost_estimate, 3000 + 3 * 1500);
        assert_eq!(result.geometry.0.len(), 3);
    }

    #[rstest]
    fn primary_without_geometry_draws_between_the_points(pickup: GeoPoint, delivery: GeoPoint) {
        let resolver =
            RouteResolver::new(StubRouteProvider::with_totals(3_400.0, 540.0), Tariff::default());

        let result = resolver.resolve(&pickup, &delivery, VehicleClass::Car);

        assert_eq!(result.source, RouteSource::Primary);
        assert_eq!(
            result.geometry,
            LineString::from(vec![Coord::<f64>::from(pickup), Coord::<f64>::from(delivery)])
        );
    }

    #[rstest]
    #[case::network(RoutingError::Network {
        url: "http://routing.invalid".to_owned(),
        message: "connection refused".to_owned(),
    })]
    #[case::http(RoutingError::Http {
        url: "http://routing.invalid".to_owned(),
        status: 503,
        message: "unavailable".to_owned(),
    })]
    #[case::malformed(RoutingError::Parse { message: "missing features".to_owned() })]
    #[case::empty(RoutingError::EmptyRoute)]
    fn provider_failure_falls_back_to_haversine(
        pickup: GeoPoint,
        delivery: GeoPoint,
        #[case] error: RoutingError,
    ) {
        let resolver = RouteResolver::new(StubRouteProvider::with_error(error), Tariff::default());

        let result = resolver.resolve(&pickup, &delivery, VehicleClass::Car);

        let expected_km = distance_km(&pickup, &delivery);
        assert_eq!(result.source, RouteSource::Fallback);
        assert_eq!(result.distance_km, expected_km);
        assert_eq!(result.duration_min, whole_minutes(expected_km * 3.0));
        assert_eq!(
            result.cost_estimate,
            Tariff::default().estimated_cost(expected_km, VehicleClass::Car)
        );
        assert_eq!(
            result.geometry,
            LineString::from(vec![(32.5825, 0.3476), (32.60, 0.35)])
        );
    }

    #[rstest]
    #[case::negative_distance(-1.0, 60.0)]
    #[case::nan_duration(1_000.0, f64::NAN)]
    #[case::infinite_distance(f64::INFINITY, 60.0)]
    fn unpriceable_primary_path_falls_back(
        pickup: GeoPoint,
        delivery: GeoPoint,
        #[case] distance_m: f64,
        #[case] duration_s: f64,
    ) {
        let provider = StubRouteProvider::with_path(routed_path(distance_m, duration_s));
        let resolver = RouteResolver::new(provider, Tariff::default());

        let result = resolver.resolve(&pickup, &delivery, VehicleClass::Car);

        assert_eq!(result.source, RouteSource::Fallback);
    }

    #[rstest]
    fn single_point_geometry_falls_back(pickup: GeoPoint, delivery: GeoPoint) {
        let path = RoutedPath {
            distance_m: 10.0,
            duration_s: 5.0,
            geometry: LineString::from(vec![(32.5825, 0.3476)]),
        };
        let resolver = RouteResolver::new(StubRouteProvider::with_path(path), Tariff::default());

        let result = resolver.resolve(&pickup, &delivery, VehicleClass::Motorcycle);

        assert_eq!(result.source, RouteSource::Fallback);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(2.5, 3)]
    #[case(f64::NAN, 0)]
    #[case(-4.0, 0)]
    fn whole_minutes_rounds_and_clamps(#[case] minutes: f64, #[case] expected: u32) {
        assert_eq!(whole_minutes(minutes), expected);
    }
}
