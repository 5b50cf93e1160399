//! Great-circle distance between two points.

use crate::GeoPoint;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between `a` and `b` in kilometres.
///
/// The result is symmetric and zero for identical points.
///
/// # Examples
///
/// ```
/// use parcelroute_core::{GeoPoint, distance_km};
///
/// let a = GeoPoint::unchecked(0.3476, 32.5825);
/// let b = GeoPoint::unchecked(0.3476, 32.6825);
/// let km = distance_km(&a, &b);
/// assert!((km - 11.1).abs() < 0.5);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is inherently floating-point"
)]
#[must_use]
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    // Clamp guards `asin` against rounding just above one for antipodes.
    let angle = 2.0 * half_chord.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let p = GeoPoint::unchecked(0.3476, 32.5825);
        assert_eq!(distance_km(&p, &p), 0.0);
    }

    #[rstest]
    fn tenth_of_a_degree_near_equator_is_about_eleven_km() {
        let a = GeoPoint::unchecked(0.3476, 32.5825);
        let b = GeoPoint::unchecked(0.3476, 32.6825);
        let km = distance_km(&a, &b);
        assert!((km - 11.1).abs() <= 0.5, "got {km}");
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = GeoPoint::unchecked(0.3476, 32.5825);
        let b = GeoPoint::unchecked(0.35, 32.60);
        assert!((distance_km(&a, &b) - distance_km(&b, &a)).abs() < 1e-9);
    }

    #[rstest]
    fn antipodes_are_half_the_circumference_apart() {
        let a = GeoPoint::unchecked(0.0, 0.0);
        let b = GeoPoint::unchecked(0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance_km(&a, &b) - expected).abs() < 1e-6);
    }
}
