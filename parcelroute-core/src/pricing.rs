//! Delivery pricing by vehicle class.
//!
//! A quote is a flat base fee plus a per-kilometre rate that depends on the
//! selected [`VehicleClass`]. Routed distances are rounded to whole
//! kilometres before the rate applies; straight-line estimates are not.

use std::str::FromStr;

use thiserror::Error;

use crate::RouteSource;

/// Flat fee added to every quote, in currency units.
pub const BASE_FEE: u64 = 3000;

/// Per-kilometre rate for motorcycles, in currency units.
pub const MOTORCYCLE_RATE_PER_KM: u64 = 1500;

/// Per-kilometre rate for cars, in currency units.
pub const CAR_RATE_PER_KM: u64 = 4000;

/// Category of vehicle carrying the parcel.
///
/// Selects both the routing profile and the per-kilometre rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleClass {
    /// Motorcycle courier.
    Motorcycle,
    /// Car courier.
    Car,
}

impl VehicleClass {
    /// Every vehicle class, in display order.
    pub const ALL: [Self; 2] = [Self::Motorcycle, Self::Car];

    /// Lower-case identifier used in configuration and form fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Motorcycle => "motorcycle",
            Self::Car => "car",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown vehicle class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle class {0:?} (expected motorcycle or car)")]
pub struct ParseVehicleClassError(pub String);

impl FromStr for VehicleClass {
    type Err = ParseVehicleClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseVehicleClassError(s.to_owned()))
    }
}

/// Fee schedule used to turn distances into quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tariff {
    /// Flat fee charged on every delivery.
    pub base_fee: u64,
    /// Rate per kilometre for [`VehicleClass::Motorcycle`].
    pub motorcycle_rate_per_km: u64,
    /// Rate per kilometre for [`VehicleClass::Car`].
    pub car_rate_per_km: u64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            base_fee: BASE_FEE,
            motorcycle_rate_per_km: MOTORCYCLE_RATE_PER_KM,
            car_rate_per_km: CAR_RATE_PER_KM,
        }
    }
}

impl Tariff {
    /// Per-kilometre rate for `vehicle`.
    #[must_use]
    pub const fn rate_per_km(&self, vehicle: VehicleClass) -> u64 {
        match vehicle {
            VehicleClass::Motorcycle => self.motorcycle_rate_per_km,
            VehicleClass::Car => self.car_rate_per_km,
        }
    }

    /// Quote for a distance reported by the routing service.
    ///
    /// The distance is rounded to whole kilometres before the rate applies.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "currency amounts are small enough to be exact in f64"
    )]
    #[must_use]
    pub fn routed_cost(&self, distance_km: f64, vehicle: VehicleClass) -> u64 {
        let km = sanitise_distance(distance_km).round();
        to_units(self.base_fee as f64 + km * self.rate_per_km(vehicle) as f64)
    }

    /// Quote for a straight-line estimate.
    ///
    /// The distance is used unrounded.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "currency amounts are small enough to be exact in f64"
    )]
    #[must_use]
    pub fn estimated_cost(&self, distance_km: f64, vehicle: VehicleClass) -> u64 {
        let km = sanitise_distance(distance_km);
        to_units(self.base_fee as f64 + km * self.rate_per_km(vehicle) as f64)
    }

    /// Quote using the formula appropriate for `source`.
    #[must_use]
    pub fn cost_for(&self, source: RouteSource, distance_km: f64, vehicle: VehicleClass) -> u64 {
        match source {
            RouteSource::Primary => self.routed_cost(distance_km, vehicle),
            RouteSource::Fallback => self.estimated_cost(distance_km, vehicle),
        }
    }
}

/// Quote a routed distance with the default [`Tariff`].
///
/// # Examples
///
/// ```
/// use parcelroute_core::{VehicleClass, estimate_cost};
///
/// assert_eq!(estimate_cost(10.0, VehicleClass::Motorcycle), 18_000);
/// assert_eq!(estimate_cost(10.0, VehicleClass::Car), 43_000);
/// ```
#[must_use]
pub fn estimate_cost(distance_km: f64, vehicle: VehicleClass) -> u64 {
    Tariff::default().routed_cost(distance_km, vehicle)
}

fn sanitise_distance(distance_km: f64) -> f64 {
    if distance_km.is_finite() && distance_km > 0.0 {
        distance_km
    } else {
        0.0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, non-negative and rounded before the cast"
)]
fn to_units(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}
