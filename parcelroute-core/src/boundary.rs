//! Country boundaries that gate which coordinates are accepted.
//!
//! The permitted region is authoritative: a point is only stored when the
//! boundary contains it, and readiness checks consult it again at read time.
//! [`BoundingRegion`] is the axis-aligned box used by default;
//! [`PolygonBoundary`] substitutes a precise outline without changing the
//! contract.

use geo::{Intersects, Point, Polygon};
use thiserror::Error;

use crate::GeoPoint;

/// Name of the country the default region covers.
pub const DEFAULT_COUNTRY_NAME: &str = "Uganda";

/// A candidate point fell outside the permitted region.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("location {point} lies outside the permitted service area")]
pub struct OutOfBoundsError {
    /// The rejected point.
    pub point: GeoPoint,
}

/// A region of the globe that accepts or rejects points.
pub trait Boundary {
    /// Returns `true` when `point` lies inside the region, edges included.
    ///
    /// Implementations must return `false`, never panic, for malformed
    /// points such as those containing NaN.
    fn contains(&self, point: &GeoPoint) -> bool;

    /// Passes `point` through when contained, otherwise reports it.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] when [`Boundary::contains`] is `false`.
    fn validate(&self, point: GeoPoint) -> Result<GeoPoint, OutOfBoundsError> {
        if self.contains(&point) {
            Ok(point)
        } else {
            Err(OutOfBoundsError { point })
        }
    }
}

/// Axis-aligned latitude/longitude box.
///
/// # Examples
///
/// ```
/// use parcelroute_core::{Boundary, BoundingRegion, GeoPoint};
///
/// let uganda = BoundingRegion::uganda();
/// assert!(uganda.contains(&GeoPoint::unchecked(0.3476, 32.5825)));
/// assert!(!uganda.contains(&GeoPoint::unchecked(-1.2921, 36.8219)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingRegion {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

/// Errors returned by [`BoundingRegion::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoundingRegionError {
    /// South edge was not strictly below the north edge.
    #[error("south edge {south} must be below north edge {north}")]
    LatitudeOrder {
        /// Requested south edge.
        south: f64,
        /// Requested north edge.
        north: f64,
    },
    /// West edge was not strictly left of the east edge.
    #[error("west edge {west} must be west of east edge {east}")]
    LongitudeOrder {
        /// Requested west edge.
        west: f64,
        /// Requested east edge.
        east: f64,
    },
}

impl BoundingRegion {
    /// Validates and constructs a [`BoundingRegion`].
    ///
    /// # Errors
    ///
    /// Returns [`BoundingRegionError`] unless `south < north` and
    /// `west < east`. NaN edges fail these comparisons and are rejected.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, BoundingRegionError> {
        if !(south < north) {
            return Err(BoundingRegionError::LatitudeOrder { south, north });
        }
        if !(west < east) {
            return Err(BoundingRegionError::LongitudeOrder { west, east });
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// The extent of Uganda.
    #[must_use]
    pub const fn uganda() -> Self {
        Self {
            south: -1.48,
            west: 29.57,
            north: 4.23,
            east: 35.0,
        }
    }

    /// Southern edge in degrees latitude.
    #[must_use]
    pub const fn south(&self) -> f64 {
        self.south
    }

    /// Western edge in degrees longitude.
    #[must_use]
    pub const fn west(&self) -> f64 {
        self.west
    }

    /// Northern edge in degrees latitude.
    #[must_use]
    pub const fn north(&self) -> f64 {
        self.north
    }

    /// Eastern edge in degrees longitude.
    #[must_use]
    pub const fn east(&self) -> f64 {
        self.east
    }
}

impl Default for BoundingRegion {
    fn default() -> Self {
        Self::uganda()
    }
}

impl Boundary for BoundingRegion {
    fn contains(&self, point: &GeoPoint) -> bool {
        contains(point, self)
    }
}

/// Tests whether `point` lies inside `region`, edges included.
///
/// Comparisons against NaN are false, so malformed points are rejected.
#[must_use]
pub fn contains(point: &GeoPoint, region: &BoundingRegion) -> bool {
    let lat = point.latitude();
    let lon = point.longitude();
    region.south <= lat && lat <= region.north && region.west <= lon && lon <= region.east
}

/// A polygonal country outline.
///
/// Coordinates follow the `geo` convention: `x` is longitude, `y` latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonBoundary {
    polygon: Polygon<f64>,
}

impl PolygonBoundary {
    /// Wraps a polygon outline.
    #[must_use]
    pub const fn new(polygon: Polygon<f64>) -> Self {
        Self { polygon }
    }
}

impl Boundary for PolygonBoundary {
    fn contains(&self, point: &GeoPoint) -> bool {
        if !(point.latitude().is_finite() && point.longitude().is_finite()) {
            return false;
        }
        // `Intersects` treats points on the outline as inside.
        self.polygon.intersects(&Point::from(*point))
    }
}

impl<B: Boundary + ?Sized> Boundary for Box<B> {
    fn contains(&self, point: &GeoPoint) -> bool {
        (**self).contains(point)
    }
}
