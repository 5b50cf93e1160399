//! Geographic coordinates expressed as latitude/longitude pairs.

use geo::{Coord, Point};
use thiserror::Error;

/// A position on the Earth's surface in decimal degrees.
///
/// Points are immutable: replacing a stored location means storing a new
/// `GeoPoint`, never mutating one in place.
///
/// # Examples
///
/// ```
/// use parcelroute_core::GeoPoint;
///
/// # fn main() -> Result<(), parcelroute_core::GeoPointError> {
/// let kampala = GeoPoint::new(0.3476, 32.5825)?;
/// assert_eq!(kampala.latitude(), 0.3476);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude was NaN, infinite or outside `[-90, 90]`.
    #[error("latitude {0} must lie within [-90, 90]")]
    Latitude(f64),
    /// Longitude was NaN, infinite or outside `[-180, 180]`.
    #[error("longitude {0} must lie within [-180, 180]")]
    Longitude(f64),
}

impl GeoPoint {
    /// Validates and constructs a [`GeoPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoPointError`] when either component is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Constructs a point without range checks.
    ///
    /// Only useful for feeding raw device or user input to a
    /// [`Boundary`](crate::Boundary), which rejects anything malformed.
    #[must_use]
    pub const fn unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the point as a `[longitude, latitude]` pair, the order
    /// routing services expect.
    #[must_use]
    pub const fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point(point.into())
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::unchecked(coord.y, coord.x)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.3476, 32.5825)]
    fn accepts_in_range_values(#[case] lat: f64, #[case] lon: f64) {
        assert!(GeoPoint::new(lat, lon).is_ok());
    }

    #[rstest]
    #[case(90.1, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    fn rejects_bad_latitude(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            GeoPoint::new(lat, lon),
            Err(GeoPointError::Latitude(_))
        ));
    }

    #[rstest]
    #[case(0.0, 180.5)]
    #[case(0.0, f64::NAN)]
    fn rejects_bad_longitude(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            GeoPoint::new(lat, lon),
            Err(GeoPointError::Longitude(_))
        ));
    }

    #[rstest]
    fn converts_to_coord_with_longitude_as_x() {
        let point = GeoPoint::unchecked(0.35, 32.6);
        let coord: Coord<f64> = point.into();
        assert_eq!(coord, Coord { x: 32.6, y: 0.35 });
        assert_eq!(GeoPoint::from(coord), point);
        assert_eq!(point.lon_lat(), [32.6, 0.35]);
    }
}
