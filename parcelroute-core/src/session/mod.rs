//! Session controller tying the pipeline together.
//!
//! A [`Session`] owns everything one delivery form needs: the permitted
//! region, the two locations, the chosen vehicle, the current route and the
//! external collaborators. Callers feed it [`SessionEvent`]s through
//! [`Session::dispatch`]; each event is applied completely before the next.
//!
//! # Superseding routes
//!
//! Route computation is split into [`Session::begin_route`] and
//! [`Session::complete_route`] so that callers running the resolver
//! elsewhere cannot interleave results. Each `begin_route` call retracts the
//! current route and issues a fresh [`RouteTicket`]. Only the most recently
//! issued ticket is accepted, and only while the locations and vehicle it
//! was issued for are still current.

mod error;
mod event;

use std::time::Duration;

use log::{info, warn};

pub use error::{PreconditionError, SessionError};
pub use event::{PointOrigin, SessionEvent, SessionOutcome};

use crate::{
    AddressResolver, Boundary, BoundingRegion, DEFAULT_COUNTRY_NAME, DEFAULT_LOCATE_TIMEOUT,
    DeliveryDetails, DeliveryRequest, DeviceLocator, GeoPoint, LocationRole, LocationStore,
    NoDeviceLocator, NoGeocoder, NullRouteView, ReverseGeocoder, RouteProvider, RouteResolver,
    RouteResult, RouteView, SubmissionReceipt, SubmissionTarget, Tariff, VehicleClass,
};

/// Fixed parameters of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Region points must fall inside.
    pub region: BoundingRegion,
    /// Country reverse-geocoded addresses are expected in.
    pub country_name: String,
    /// Longest wait for a device position.
    pub locate_timeout: Duration,
    /// Fee schedule for quotes.
    pub tariff: Tariff,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            region: BoundingRegion::uganda(),
            country_name: DEFAULT_COUNTRY_NAME.to_owned(),
            locate_timeout: DEFAULT_LOCATE_TIMEOUT,
            tariff: Tariff::default(),
        }
    }
}

/// Authorisation to apply one route computation.
///
/// Issued by [`Session::begin_route`]; carries the inputs to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTicket {
    id: u64,
    /// Pickup point to route from.
    pub from: GeoPoint,
    /// Delivery point to route to.
    pub to: GeoPoint,
    /// Vehicle class to route and price for.
    pub vehicle: VehicleClass,
}

/// What [`Session::complete_route`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteApplication {
    /// The result is now the current route.
    Applied,
    /// A newer ticket was issued; the result was discarded.
    Superseded,
    /// The inputs changed since the ticket was issued; the result was
    /// discarded.
    Stale,
}

/// One delivery form's state and collaborators.
///
/// # Examples
///
/// ```
/// use parcelroute_core::test_support::StubRouteProvider;
/// use parcelroute_core::{
///     GeoPoint, LocationRole, PointOrigin, RouteSource, Session, SessionConfig, SessionEvent,
///     SessionOutcome, VehicleClass,
/// };
///
/// # fn main() -> Result<(), parcelroute_core::SessionError> {
/// let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing());
/// for (role, point) in [
///     (LocationRole::Pickup, GeoPoint::unchecked(0.3476, 32.5825)),
///     (LocationRole::Delivery, GeoPoint::unchecked(0.35, 32.60)),
/// ] {
///     session.dispatch(SessionEvent::SelectPoint {
///         role,
///         point,
///         origin: PointOrigin::MapClick,
///         label: None,
///     })?;
/// }
/// session.dispatch(SessionEvent::SelectVehicle { vehicle: VehicleClass::Car })?;
/// let outcome = session.dispatch(SessionEvent::RequestRoute)?;
/// assert!(matches!(
///     outcome,
///     SessionOutcome::RouteComputed { route } if route.source == RouteSource::Fallback
/// ));
/// # Ok(())
/// # }
/// ```
pub struct Session {
    config: SessionConfig,
    boundary: Box<dyn Boundary>,
    store: LocationStore,
    vehicle: Option<VehicleClass>,
    route: Option<RouteResult>,
    resolver: RouteResolver<Box<dyn RouteProvider>>,
    addresses: AddressResolver<Box<dyn ReverseGeocoder>>,
    locator: Box<dyn DeviceLocator>,
    view: Box<dyn RouteView>,
    tickets_issued: u64,
    pending_ticket: Option<u64>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("vehicle", &self.vehicle)
            .field("route", &self.route)
            .field("tickets_issued", &self.tickets_issued)
            .field("pending_ticket", &self.pending_ticket)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session routing through `provider`.
    ///
    /// The session starts without a geocoder, device locator or view; add
    /// them with the `with_*` methods.
    pub fn new(config: SessionConfig, provider: impl RouteProvider + 'static) -> Self {
        let boundary: Box<dyn Boundary> = Box::new(config.region);
        let provider: Box<dyn RouteProvider> = Box::new(provider);
        let geocoder: Box<dyn ReverseGeocoder> = Box::new(NoGeocoder);
        Self {
            resolver: RouteResolver::new(provider, config.tariff),
            addresses: AddressResolver::new(geocoder, config.country_name.clone()),
            boundary,
            store: LocationStore::new(),
            vehicle: None,
            route: None,
            locator: Box::new(NoDeviceLocator),
            view: Box::new(NullRouteView),
            tickets_issued: 0,
            pending_ticket: None,
            config,
        }
    }

    /// Replaces the region check, e.g. with a
    /// [`PolygonBoundary`](crate::PolygonBoundary) outline.
    #[must_use]
    pub fn with_boundary(mut self, boundary: impl Boundary + 'static) -> Self {
        self.boundary = Box::new(boundary);
        self
    }

    /// Uses `geocoder` for address lookups.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: impl ReverseGeocoder + 'static) -> Self {
        let boxed: Box<dyn ReverseGeocoder> = Box::new(geocoder);
        self.addresses = AddressResolver::new(boxed, self.config.country_name.clone());
        self
    }

    /// Uses `locator` for device positions.
    #[must_use]
    pub fn with_locator(mut self, locator: impl DeviceLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Presents routes through `view`.
    #[must_use]
    pub fn with_view(mut self, view: impl RouteView + 'static) -> Self {
        self.view = Box::new(view);
        self
    }

    /// Session parameters.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Stored locations.
    #[must_use]
    pub const fn locations(&self) -> &LocationStore {
        &self.store
    }

    /// Selected vehicle class.
    #[must_use]
    pub const fn vehicle(&self) -> Option<VehicleClass> {
        self.vehicle
    }

    /// Current route, if one is computed and still valid.
    #[must_use]
    pub const fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    /// `true` when both locations are set and inside the region.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.store.is_ready(self.boundary.as_ref())
    }

    /// `true` when a route may be requested.
    #[must_use]
    pub fn can_request_route(&self) -> bool {
        self.is_ready() && self.vehicle.is_some()
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the event is rejected; state is left as
    /// it was.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<SessionOutcome, SessionError> {
        match event {
            SessionEvent::SelectPoint {
                role, point, label, ..
            } => self.select_point(role, point, label),
            SessionEvent::EditAddress { role, address } => {
                self.store.set_address(role, address);
                Ok(SessionOutcome::AddressUpdated { role })
            }
            SessionEvent::LocateDevice { role } => self.locate_device(role),
            SessionEvent::ClearLocation { role } => {
                self.clear(role);
                Ok(SessionOutcome::LocationCleared { role })
            }
            SessionEvent::SelectVehicle { vehicle } => {
                self.select_vehicle(vehicle);
                Ok(SessionOutcome::VehicleSelected { vehicle })
            }
            SessionEvent::RequestRoute => {
                let route = self.request_route()?;
                Ok(SessionOutcome::RouteComputed { route })
            }
        }
    }

    fn select_point(
        &mut self,
        role: LocationRole,
        point: GeoPoint,
        label: Option<String>,
    ) -> Result<SessionOutcome, SessionError> {
        let accepted = self.boundary.validate(point).inspect_err(|err| {
            warn!("rejected {role} location: {err}");
        })?;

        let lookup = if label.is_some() {
            None
        } else {
            Some(self.addresses.lookup(&accepted))
        };
        let address = label.or_else(|| {
            lookup
                .as_ref()
                .and_then(|l| l.autofill_text())
                .map(str::to_owned)
        });

        let previous = self.store.point(role);
        self.store
            .set(self.boundary.as_ref(), role, accepted, address)?;
        if previous != Some(accepted) {
            self.invalidate_route();
        }
        info!("{role} location set to {accepted}");
        Ok(SessionOutcome::LocationAccepted {
            role,
            point: accepted,
            lookup,
        })
    }

    fn locate_device(&mut self, role: LocationRole) -> Result<SessionOutcome, SessionError> {
        let point = self
            .locator
            .locate(self.config.locate_timeout)
            .inspect_err(|err| warn!("device location for {role} failed: {err}"))?;
        self.select_point(role, point, None)
    }

    /// Forget the location for `role` and any route computed from it.
    pub fn clear(&mut self, role: LocationRole) {
        self.store.clear(role);
        self.invalidate_route();
    }

    /// Store the chosen vehicle class.
    ///
    /// Changing the class discards the current route, whose quote no longer
    /// applies.
    pub fn select_vehicle(&mut self, vehicle: VehicleClass) {
        if self.vehicle == Some(vehicle) {
            return;
        }
        self.vehicle = Some(vehicle);
        self.invalidate_route();
    }

    /// Compute and apply a route for the current inputs.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] when a location or the vehicle class is
    /// missing or a location has left the region.
    pub fn request_route(&mut self) -> Result<RouteResult, PreconditionError> {
        let ticket = self.begin_route()?;
        let route = self
            .resolver
            .resolve(&ticket.from, &ticket.to, ticket.vehicle);
        self.complete_route(&ticket, route.clone());
        Ok(route)
    }

    /// Check the inputs and authorise one route computation.
    ///
    /// Retracts the current route; any earlier ticket is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] when a location or the vehicle class is
    /// missing or a location has left the region. Nothing changes in that
    /// case.
    pub fn begin_route(&mut self) -> Result<RouteTicket, PreconditionError> {
        let (from, to) = self.checked_points()?;
        let vehicle = self.vehicle.ok_or(PreconditionError::MissingVehicle)?;

        self.invalidate_route();
        self.tickets_issued += 1;
        self.pending_ticket = Some(self.tickets_issued);
        Ok(RouteTicket {
            id: self.tickets_issued,
            from,
            to,
            vehicle,
        })
    }

    /// Offer the result computed for `ticket`.
    ///
    /// The result becomes current only if `ticket` is the latest issued and
    /// its inputs are unchanged; the view is retracted before it is shown.
    pub fn complete_route(&mut self, ticket: &RouteTicket, route: RouteResult) -> RouteApplication {
        if self.pending_ticket != Some(ticket.id) {
            warn!("discarding route from superseded request #{}", ticket.id);
            return RouteApplication::Superseded;
        }
        if !self.inputs_match(ticket) {
            warn!("discarding route from request #{}: inputs changed", ticket.id);
            self.pending_ticket = None;
            return RouteApplication::Stale;
        }
        if route.source.is_estimate() {
            warn!(
                "showing straight-line estimate for request #{}: {:.2} km",
                ticket.id, route.distance_km
            );
        }
        self.pending_ticket = None;
        self.view.retract();
        self.view.present(&route);
        self.route = Some(route);
        RouteApplication::Applied
    }

    /// Take an immutable snapshot for submission.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] when contact fields are blank, the
    /// locations or vehicle are not ready, or no route is current.
    pub fn snapshot(&self, details: DeliveryDetails) -> Result<DeliveryRequest, PreconditionError> {
        details.validate()?;
        self.checked_points()?;
        let vehicle = self.vehicle.ok_or(PreconditionError::MissingVehicle)?;
        let route = self.route.clone().ok_or(PreconditionError::MissingRoute)?;
        Ok(DeliveryRequest {
            details,
            pickup: self.store.entry(LocationRole::Pickup).clone(),
            delivery: self.store.entry(LocationRole::Delivery).clone(),
            vehicle,
            route,
        })
    }

    /// Snapshot the request and hand it to `target`.
    ///
    /// Delivery failures are recorded on the receipt, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] when [`Session::snapshot`] does.
    pub fn submit(
        &self,
        details: DeliveryDetails,
        target: &dyn SubmissionTarget,
    ) -> Result<SubmissionReceipt, PreconditionError> {
        let request = self.snapshot(details)?;
        let failure = target.submit(&request).err();
        if let Some(err) = &failure {
            warn!("delivery request submission failed: {err}");
        }
        Ok(SubmissionReceipt { request, failure })
    }

    fn checked_points(&self) -> Result<(GeoPoint, GeoPoint), PreconditionError> {
        let check = |role: LocationRole| {
            let point = self
                .store
                .point(role)
                .ok_or(PreconditionError::MissingLocation { role })?;
            if self.boundary.contains(&point) {
                Ok(point)
            } else {
                Err(PreconditionError::LocationOutOfBounds { role })
            }
        };
        Ok((check(LocationRole::Pickup)?, check(LocationRole::Delivery)?))
    }

    fn inputs_match(&self, ticket: &RouteTicket) -> bool {
        self.store.point(LocationRole::Pickup) == Some(ticket.from)
            && self.store.point(LocationRole::Delivery) == Some(ticket.to)
            && self.vehicle == Some(ticket.vehicle)
    }

    fn invalidate_route(&mut self) {
        if self.route.take().is_some() {
            info!("current route discarded");
        }
        self.view.retract();
    }
}

#[cfg(test)]
mod tests;
