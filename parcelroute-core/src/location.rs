//! The two locations a delivery runs between.
//!
//! [`LocationStore`] holds the pickup and delivery entries for one session.
//! Each entry is a point and an optional address line. Points only enter
//! the store after passing the session [`Boundary`].

use log::debug;

use crate::{Boundary, GeoPoint, OutOfBoundsError};

/// The slot a location occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocationRole {
    /// Where the parcel is collected.
    Pickup,
    /// Where the parcel is dropped off.
    Delivery,
}

impl LocationRole {
    /// Both roles.
    pub const ALL: [Self; 2] = [Self::Pickup, Self::Delivery];

    /// Lower-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for LocationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The state of one role.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationEntry {
    /// Confirmed point, if any.
    pub point: Option<GeoPoint>,
    /// Free-text address line, if any.
    pub address: Option<String>,
    /// `true` when the address line was typed by hand rather than suggested
    /// for the current point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address_entered: bool,
}

/// Pickup and delivery entries for one session.
///
/// The store tracks a revision that advances on every observable change,
/// so callers can detect whether a computed route still matches its inputs.
///
/// # Examples
///
/// ```
/// use parcelroute_core::{BoundingRegion, GeoPoint, LocationRole, LocationStore};
///
/// # fn main() -> Result<(), parcelroute_core::OutOfBoundsError> {
/// let region = BoundingRegion::uganda();
/// let mut store = LocationStore::new();
/// store.set(&region, LocationRole::Pickup, GeoPoint::unchecked(0.3476, 32.5825), None)?;
/// assert!(!store.is_ready(&region));
/// store.set(&region, LocationRole::Delivery, GeoPoint::unchecked(0.35, 32.6), None)?;
/// assert!(store.is_ready(&region));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationStore {
    pickup: LocationEntry,
    delivery: LocationEntry,
    revision: u64,
}

impl LocationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `role`.
    #[must_use]
    pub const fn entry(&self, role: LocationRole) -> &LocationEntry {
        match role {
            LocationRole::Pickup => &self.pickup,
            LocationRole::Delivery => &self.delivery,
        }
    }

    /// The point stored for `role`, if any.
    #[must_use]
    pub const fn point(&self, role: LocationRole) -> Option<GeoPoint> {
        self.entry(role).point
    }

    /// Counter advanced on every observable change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    const fn entry_mut(&mut self, role: LocationRole) -> &mut LocationEntry {
        match role {
            LocationRole::Pickup => &mut self.pickup,
            LocationRole::Delivery => &mut self.delivery,
        }
    }

    /// Stores `point` for `role`, replacing any previous point.
    ///
    /// `address` is text suggested for this point, such as a search result
    /// name or a matched reverse lookup. When it is `None` and the point
    /// moves, a suggested address belonging to the old point is dropped; a
    /// hand-entered address is kept. Storing the same point and address
    /// again leaves the store untouched.
    ///
    /// Returns `true` when the entry changed.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] without touching the store when `point`
    /// lies outside `boundary`.
    pub fn set(
        &mut self,
        boundary: &dyn Boundary,
        role: LocationRole,
        point: GeoPoint,
        address: Option<String>,
    ) -> Result<bool, OutOfBoundsError> {
        let accepted = boundary.validate(point)?;
        let entry = self.entry_mut(role);
        let point_changed = entry.point != Some(accepted);
        let (next_address, next_entered) = match address {
            Some(text) => (Some(text), false),
            None if point_changed && !entry.address_entered => (None, false),
            None => (entry.address.clone(), entry.address_entered),
        };
        if !point_changed && next_address == entry.address && next_entered == entry.address_entered
        {
            return Ok(false);
        }
        if entry.address.is_some() && next_address.is_none() {
            debug!("{role} address dropped with its previous point");
        }
        entry.point = Some(accepted);
        entry.address = next_address;
        entry.address_entered = next_entered;
        self.revision += 1;
        debug!("{role} set to {accepted} (revision {})", self.revision);
        Ok(true)
    }

    /// Replaces the address line for `role` with hand-entered text without
    /// touching its point.
    ///
    /// Returns `true` when the entry changed.
    pub fn set_address(&mut self, role: LocationRole, address: Option<String>) -> bool {
        let entry = self.entry_mut(role);
        let entered = address.is_some();
        if entry.address == address && entry.address_entered == entered {
            return false;
        }
        entry.address = address;
        entry.address_entered = entered;
        self.revision += 1;
        true
    }

    /// Returns `role` to the empty state.
    ///
    /// Returns `true` when the entry changed.
    pub fn clear(&mut self, role: LocationRole) -> bool {
        let entry = self.entry_mut(role);
        if *entry == LocationEntry::default() {
            return false;
        }
        *entry = LocationEntry::default();
        self.revision += 1;
        debug!("{role} cleared (revision {})", self.revision);
        true
    }

    /// Both points, when both are present and inside `boundary`.
    #[must_use]
    pub fn ready_points(&self, boundary: &dyn Boundary) -> Option<(GeoPoint, GeoPoint)> {
        let pickup = self.pickup.point.filter(|p| boundary.contains(p))?;
        let delivery = self.delivery.point.filter(|p| boundary.contains(p))?;
        Some((pickup, delivery))
    }

    /// `true` when both roles hold points that `boundary` still contains.
    #[must_use]
    pub fn is_ready(&self, boundary: &dyn Boundary) -> bool {
        self.ready_points(boundary).is_some()
    }
}
