//! Typed triggers applied by [`Session::dispatch`](crate::Session::dispatch).

use crate::{AddressLookup, GeoPoint, LocationRole, RouteResult, VehicleClass};

/// How a point was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOrigin {
    /// Tap or click on the map.
    MapClick,
    /// A marker was dragged and released.
    MarkerDrag,
    /// A place search result.
    Search,
    /// The device's own position.
    Device,
}

/// A discrete trigger from the user or the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A point was chosen for `role`.
    SelectPoint {
        /// Slot the point is for.
        role: LocationRole,
        /// The candidate point.
        point: GeoPoint,
        /// How it was chosen.
        origin: PointOrigin,
        /// Address text already known for the point, such as a search
        /// result's name. When present no reverse lookup is made.
        label: Option<String>,
    },
    /// The address line for `role` was edited by hand.
    EditAddress {
        /// Slot being edited.
        role: LocationRole,
        /// New text; `None` clears it.
        address: Option<String>,
    },
    /// Use the device's position for `role`.
    LocateDevice {
        /// Slot to fill.
        role: LocationRole,
    },
    /// Forget the location for `role`.
    ClearLocation {
        /// Slot to empty.
        role: LocationRole,
    },
    /// A vehicle class was chosen.
    SelectVehicle {
        /// The chosen class.
        vehicle: VehicleClass,
    },
    /// Compute the route and quote for the current inputs.
    RequestRoute,
}

/// What a successfully applied [`SessionEvent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The point was stored.
    LocationAccepted {
        /// Slot filled.
        role: LocationRole,
        /// Stored point.
        point: GeoPoint,
        /// Reverse lookup result, when one was made.
        lookup: Option<AddressLookup>,
    },
    /// The address line was replaced.
    AddressUpdated {
        /// Slot edited.
        role: LocationRole,
    },
    /// The location was forgotten.
    LocationCleared {
        /// Slot emptied.
        role: LocationRole,
    },
    /// The vehicle class was stored.
    VehicleSelected {
        /// Stored class.
        vehicle: VehicleClass,
    },
    /// A new route replaced any previous one.
    RouteComputed {
        /// The applied route.
        route: RouteResult,
    },
}
