//! Deterministic collaborators for unit and behaviour tests.
//!
//! None of these touch the network; each returns a pre-configured answer.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use geo::{Coord, LineString};

use crate::{
    Address, DeliveryRequest, DeviceLocationError, DeviceLocator, GeoPoint, GeocodingError,
    ReverseGeocoder, RouteProvider, RouteResult, RouteSource, RoutedPath, RoutingError,
    SubmissionError, SubmissionTarget, VehicleClass,
};

/// `RouteProvider` returning a fixed path or error.
#[derive(Debug, Clone)]
pub struct StubRouteProvider {
    response: Result<RoutedPath, RoutingError>,
}

impl StubRouteProvider {
    /// Answer every request with `path`.
    #[must_use]
    pub fn with_path(path: RoutedPath) -> Self {
        Self { response: Ok(path) }
    }

    /// Answer every request with `error`.
    #[must_use]
    pub fn with_error(error: RoutingError) -> Self {
        Self {
            response: Err(error),
        }
    }

    /// Fail every request with a network error.
    #[must_use]
    pub fn failing() -> Self {
        Self::with_error(RoutingError::Network {
            url: "http://routing.invalid/v2/directions".to_owned(),
            message: "connection refused".to_owned(),
        })
    }

    /// Answer with a path of the given length and duration running
    /// straight between the requested points.
    #[must_use]
    pub fn with_totals(distance_m: f64, duration_s: f64) -> Self {
        Self::with_path(RoutedPath {
            distance_m,
            duration_s,
            geometry: LineString::new(Vec::new()),
        })
    }
}

impl RouteProvider for StubRouteProvider {
    fn directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        _vehicle: VehicleClass,
    ) -> Result<RoutedPath, RoutingError> {
        let mut path = self.response.clone()?;
        if path.geometry.0.is_empty() {
            path.geometry =
                LineString::from(vec![Coord::<f64>::from(*from), Coord::<f64>::from(*to)]);
        }
        Ok(path)
    }
}

/// `ReverseGeocoder` returning a fixed address or error.
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: Result<Address, GeocodingError>,
}

impl StubGeocoder {
    /// Answer every lookup with `address`.
    #[must_use]
    pub fn with_address(address: Address) -> Self {
        Self {
            response: Ok(address),
        }
    }

    /// Answer every lookup with `error`.
    #[must_use]
    pub fn with_error(error: GeocodingError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl ReverseGeocoder for StubGeocoder {
    fn reverse_lookup(&self, _point: &GeoPoint) -> Result<Address, GeocodingError> {
        self.response.clone()
    }
}

/// `DeviceLocator` returning a fixed position or error, optionally slowly.
#[derive(Debug, Clone)]
pub struct StubLocator {
    response: Result<GeoPoint, DeviceLocationError>,
    delay: Duration,
}

impl StubLocator {
    /// Report `point`.
    #[must_use]
    pub fn with_point(point: GeoPoint) -> Self {
        Self {
            response: Ok(point),
            delay: Duration::ZERO,
        }
    }

    /// Report `error`.
    #[must_use]
    pub fn with_error(error: DeviceLocationError) -> Self {
        Self {
            response: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Sleep for `delay` before answering, ignoring the caller's timeout.
    #[must_use]
    pub fn delayed_by(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl DeviceLocator for StubLocator {
    fn locate(&self, _timeout: Duration) -> Result<GeoPoint, DeviceLocationError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.response.clone()
    }
}

/// A call observed by [`RecordingRouteView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCall {
    /// The overlay was removed.
    Retract,
    /// A route from the given source was drawn.
    Present(RouteSource),
}

/// `RouteView` recording every call; clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRouteView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
    shown: Rc<RefCell<Option<RouteResult>>>,
}

impl RecordingRouteView {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    /// The route currently drawn, if any.
    #[must_use]
    pub fn shown(&self) -> Option<RouteResult> {
        self.shown.borrow().clone()
    }
}

impl crate::RouteView for RecordingRouteView {
    fn retract(&mut self) {
        self.calls.borrow_mut().push(ViewCall::Retract);
        self.shown.replace(None);
    }

    fn present(&mut self, route: &RouteResult) {
        self.calls.borrow_mut().push(ViewCall::Present(route.source));
        self.shown.replace(Some(route.clone()));
    }
}

/// `SubmissionTarget` keeping every request it receives.
#[derive(Debug, Default)]
pub struct RecordingSubmissionTarget {
    received: RefCell<Vec<DeliveryRequest>>,
    failure: Option<SubmissionError>,
}

impl RecordingSubmissionTarget {
    /// Accept every submission.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Record every submission, then fail it with `error`.
    #[must_use]
    pub fn failing_with(error: SubmissionError) -> Self {
        Self {
            received: RefCell::default(),
            failure: Some(error),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn received(&self) -> Vec<DeliveryRequest> {
        self.received.borrow().clone()
    }
}

impl SubmissionTarget for RecordingSubmissionTarget {
    fn submit(&self, request: &DeliveryRequest) -> Result<(), SubmissionError> {
        self.received.borrow_mut().push(request.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
