//! Unit tests for the session controller.
#![expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "tests fail fast and compare against hand-computed fares"
)]

use super::*;
use crate::test_support::{
    RecordingRouteView, RecordingSubmissionTarget, StubGeocoder, StubLocator, StubRouteProvider,
    ViewCall,
};
use crate::{
    Address, AddressLookup, ContactDetails, DeviceLocationError, GeocodingError, RouteSource,
    SubmissionError, distance_km,
};
use rstest::{fixture, rstest};

fn pickup_point() -> GeoPoint {
    GeoPoint::unchecked(0.3476, 32.5825)
}

fn delivery_point() -> GeoPoint {
    GeoPoint::unchecked(0.35, 32.60)
}

fn select(role: LocationRole, point: GeoPoint) -> SessionEvent {
    SessionEvent::SelectPoint {
        role,
        point,
        origin: PointOrigin::MapClick,
        label: None,
    }
}

fn details() -> DeliveryDetails {
    DeliveryDetails {
        sender: ContactDetails::new("Amina", "+256700000001"),
        recipient: ContactDetails::new("Okello", "+256700000002"),
        parcel_description: None,
        notes: None,
    }
}

#[fixture]
fn view() -> RecordingRouteView {
    RecordingRouteView::new()
}

/// Session with both points and a car selected, routing failing.
fn ready_session(view: &RecordingRouteView) -> Session {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing())
        .with_view(view.clone());
    session
        .dispatch(select(LocationRole::Pickup, pickup_point()))
        .expect("pickup accepted");
    session
        .dispatch(select(LocationRole::Delivery, delivery_point()))
        .expect("delivery accepted");
    session
        .dispatch(SessionEvent::SelectVehicle {
            vehicle: VehicleClass::Car,
        })
        .expect("vehicle selected");
    session
}

#[rstest]
fn fallback_end_to_end(view: RecordingRouteView) {
    let mut session = ready_session(&view);

    let route = session.request_route().expect("inputs ready");

    let km = distance_km(&pickup_point(), &delivery_point());
    assert_eq!(route.source, RouteSource::Fallback);
    assert_eq!(route.distance_km, km);
    assert_eq!(route.duration_min, whole_minutes(km * 3.0));
    assert_eq!(route.cost_estimate, rounded(3000.0 + km * 4000.0));
    assert_eq!(session.route(), Some(&route));
    assert_eq!(view.shown(), Some(route));
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "test values are small and positive"
)]
fn whole_minutes(value: f64) -> u32 {
    value.round() as u32
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "test values are small and positive"
)]
fn rounded(value: f64) -> u64 {
    value.round() as u64
}

#[rstest]
fn primary_route_is_applied(view: RecordingRouteView) {
    let mut session = Session::new(
        SessionConfig::default(),
        StubRouteProvider::with_totals(3_400.0, 540.0),
    )
    .with_view(view.clone());
    session
        .dispatch(select(LocationRole::Pickup, pickup_point()))
        .expect("pickup accepted");
    session
        .dispatch(select(LocationRole::Delivery, delivery_point()))
        .expect("delivery accepted");
    session.select_vehicle(VehicleClass::Motorcycle);

    let route = session.request_route().expect("inputs ready");

    assert_eq!(route.source, RouteSource::Primary);
    assert_eq!(route.duration_min, 9);
    assert_eq!(route.cost_estimate, 3000 + 3 * 1500);
}

#[rstest]
fn out_of_bounds_selection_is_rejected_without_changes(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    let before = session.locations().clone();

    let err = session
        .dispatch(select(LocationRole::Pickup, GeoPoint::unchecked(-1.2921, 36.8219)))
        .expect_err("Nairobi is outside Uganda");

    assert!(matches!(err, SessionError::OutOfBounds(_)));
    assert_eq!(session.locations(), &before);
    assert!(session.is_ready());
}

#[rstest]
#[case::no_locations(None, None, Some(VehicleClass::Car), PreconditionError::MissingLocation { role: LocationRole::Pickup })]
#[case::no_delivery(Some(pickup_point()), None, Some(VehicleClass::Car), PreconditionError::MissingLocation { role: LocationRole::Delivery })]
#[case::no_vehicle(Some(pickup_point()), Some(delivery_point()), None, PreconditionError::MissingVehicle)]
fn route_preconditions_are_reported(
    #[case] pickup: Option<GeoPoint>,
    #[case] delivery: Option<GeoPoint>,
    #[case] vehicle: Option<VehicleClass>,
    #[case] expected: PreconditionError,
) {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing());
    if let Some(point) = pickup {
        session
            .dispatch(select(LocationRole::Pickup, point))
            .expect("pickup accepted");
    }
    if let Some(point) = delivery {
        session
            .dispatch(select(LocationRole::Delivery, point))
            .expect("delivery accepted");
    }
    if let Some(class) = vehicle {
        session.select_vehicle(class);
    }

    let err = session
        .dispatch(SessionEvent::RequestRoute)
        .expect_err("preconditions unmet");

    assert_eq!(err, SessionError::Precondition(expected));
    assert!(session.route().is_none());
}

#[rstest]
fn point_outside_a_narrowed_boundary_fails_readiness(view: RecordingRouteView) {
    let narrow = BoundingRegion::new(0.0, 32.0, 0.348, 33.0).expect("valid region");
    let mut session = ready_session(&view).with_boundary(narrow);

    assert!(!session.is_ready());
    assert_eq!(
        session.request_route(),
        Err(PreconditionError::LocationOutOfBounds {
            role: LocationRole::Delivery
        })
    );
}

#[rstest]
#[case(LocationRole::Pickup)]
#[case(LocationRole::Delivery)]
fn clearing_invalidates_route_and_readiness(view: RecordingRouteView, #[case] role: LocationRole) {
    let mut session = ready_session(&view);
    session.request_route().expect("inputs ready");

    let outcome = session
        .dispatch(SessionEvent::ClearLocation { role })
        .expect("clear always succeeds");

    assert_eq!(outcome, SessionOutcome::LocationCleared { role });
    assert!(!session.is_ready());
    assert!(!session.can_request_route());
    assert!(session.route().is_none());
    assert_eq!(view.shown(), None);
    assert_eq!(view.calls().last(), Some(&ViewCall::Retract));
}

#[rstest]
fn reselecting_the_same_point_keeps_the_route(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    let route = session.request_route().expect("inputs ready");
    let before = session.locations().clone();

    session
        .dispatch(select(LocationRole::Pickup, pickup_point()))
        .expect("pickup accepted");

    assert_eq!(session.locations(), &before);
    assert!(session.is_ready());
    assert_eq!(session.route(), Some(&route));
}

#[rstest]
fn moving_a_point_discards_the_route(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    session.request_route().expect("inputs ready");

    session
        .dispatch(select(LocationRole::Delivery, GeoPoint::unchecked(0.36, 32.61)))
        .expect("delivery accepted");

    assert!(session.route().is_none());
    assert!(session.is_ready());
}

#[rstest]
fn changing_vehicle_discards_the_route(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    session.request_route().expect("inputs ready");

    session.select_vehicle(VehicleClass::Motorcycle);

    assert!(session.route().is_none());
}

#[rstest]
fn recomputation_retracts_before_presenting(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    session.request_route().expect("first route");
    session.request_route().expect("second route");

    let calls = view.calls();
    let presents: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, call)| matches!(call, ViewCall::Present(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(presents.len(), 2);
    for index in presents {
        let previous = index.checked_sub(1).and_then(|i| calls.get(i));
        assert_eq!(previous, Some(&ViewCall::Retract));
    }
}

#[rstest]
fn superseded_ticket_is_discarded(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    let first = session.begin_route().expect("inputs ready");
    let second = session.begin_route().expect("inputs ready");
    let resolver = RouteResolver::new(StubRouteProvider::failing(), Tariff::default());
    let route = resolver.resolve(&second.from, &second.to, second.vehicle);

    assert_eq!(
        session.complete_route(&first, route.clone()),
        RouteApplication::Superseded
    );
    assert!(session.route().is_none());
    assert_eq!(session.complete_route(&second, route), RouteApplication::Applied);
    assert!(session.route().is_some());
}

#[rstest]
fn ticket_is_stale_after_clear(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    let ticket = session.begin_route().expect("inputs ready");
    let resolver = RouteResolver::new(StubRouteProvider::failing(), Tariff::default());
    let route = resolver.resolve(&ticket.from, &ticket.to, ticket.vehicle);

    session.clear(LocationRole::Pickup);

    assert_eq!(session.complete_route(&ticket, route), RouteApplication::Stale);
    assert!(session.route().is_none());
    assert_eq!(view.shown(), None);
}

#[rstest]
fn matched_lookup_fills_the_address() {
    let geocoder = StubGeocoder::with_address(Address {
        display_name: "Kampala Road, Kampala".to_owned(),
        country: "Uganda".to_owned(),
    });
    let mut session =
        Session::new(SessionConfig::default(), StubRouteProvider::failing()).with_geocoder(geocoder);

    let outcome = session
        .dispatch(select(LocationRole::Pickup, pickup_point()))
        .expect("pickup accepted");

    assert!(matches!(
        outcome,
        SessionOutcome::LocationAccepted {
            lookup: Some(AddressLookup::Matched { .. }),
            ..
        }
    ));
    assert_eq!(
        session.locations().entry(LocationRole::Pickup).address.as_deref(),
        Some("Kampala Road, Kampala")
    );
}

#[rstest]
fn country_mismatch_keeps_the_point_but_skips_autofill() {
    let geocoder = StubGeocoder::with_address(Address {
        display_name: "Busia, Kenya".to_owned(),
        country: "Kenya".to_owned(),
    });
    let mut session =
        Session::new(SessionConfig::default(), StubRouteProvider::failing()).with_geocoder(geocoder);

    let outcome = session
        .dispatch(select(LocationRole::Pickup, pickup_point()))
        .expect("pickup accepted");

    match outcome {
        SessionOutcome::LocationAccepted { lookup, point, .. } => {
            assert!(lookup.is_some_and(|l| l.is_mismatch()));
            assert_eq!(point, pickup_point());
        }
        other => panic!("expected LocationAccepted, got {other:?}"),
    }
    let entry = session.locations().entry(LocationRole::Pickup);
    assert_eq!(entry.point, Some(pickup_point()));
    assert_eq!(entry.address, None);
}

#[rstest]
fn search_label_is_stored_without_lookup() {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing());

    let outcome = session
        .dispatch(SessionEvent::SelectPoint {
            role: LocationRole::Delivery,
            point: delivery_point(),
            origin: PointOrigin::Search,
            label: Some("Ntinda Shopping Centre".to_owned()),
        })
        .expect("delivery accepted");

    assert!(matches!(
        outcome,
        SessionOutcome::LocationAccepted { lookup: None, .. }
    ));
    assert_eq!(
        session.locations().entry(LocationRole::Delivery).address.as_deref(),
        Some("Ntinda Shopping Centre")
    );
}

fn labelled(role: LocationRole, point: GeoPoint, label: &str) -> SessionEvent {
    SessionEvent::SelectPoint {
        role,
        point,
        origin: PointOrigin::Search,
        label: Some(label.to_owned()),
    }
}

#[rstest]
fn failed_lookup_after_a_move_clears_the_suggested_address() {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing())
        .with_geocoder(StubGeocoder::with_error(GeocodingError::Service {
            message: "rate limited".to_owned(),
        }));
    session
        .dispatch(labelled(LocationRole::Pickup, pickup_point(), "Kampala Road"))
        .expect("pickup accepted");

    let moved = GeoPoint::unchecked(2.77, 32.30);
    session
        .dispatch(select(LocationRole::Pickup, moved))
        .expect("move accepted");

    let entry = session.locations().entry(LocationRole::Pickup);
    assert_eq!(entry.point, Some(moved));
    assert_eq!(entry.address, None);
}

#[rstest]
fn mismatched_lookup_after_a_move_clears_the_suggested_address() {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing())
        .with_geocoder(StubGeocoder::with_address(Address {
            display_name: "Kampala Road, Kampala".to_owned(),
            country: "Uganda".to_owned(),
        }));
    session
        .dispatch(select(LocationRole::Delivery, delivery_point()))
        .expect("delivery accepted");

    let mut session = session.with_geocoder(StubGeocoder::with_address(Address {
        display_name: "Busia, Kenya".to_owned(),
        country: "Kenya".to_owned(),
    }));
    let moved = GeoPoint::unchecked(0.46, 34.09);
    session
        .dispatch(select(LocationRole::Delivery, moved))
        .expect("move accepted");

    let entry = session.locations().entry(LocationRole::Delivery);
    assert_eq!(entry.point, Some(moved));
    assert_eq!(entry.address, None);
}

#[rstest]
fn typed_address_survives_a_move() {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing());
    session
        .dispatch(labelled(LocationRole::Pickup, pickup_point(), "Kampala Road"))
        .expect("pickup accepted");
    session
        .dispatch(SessionEvent::EditAddress {
            role: LocationRole::Pickup,
            address: Some("Plot 12, back entrance".to_owned()),
        })
        .expect("address edited");

    session
        .dispatch(select(LocationRole::Pickup, GeoPoint::unchecked(0.33, 32.57)))
        .expect("move accepted");

    assert_eq!(
        session.locations().entry(LocationRole::Pickup).address.as_deref(),
        Some("Plot 12, back entrance")
    );
}

#[rstest]
fn device_location_fills_the_role() {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing())
        .with_locator(StubLocator::with_point(pickup_point()));

    session
        .dispatch(SessionEvent::LocateDevice {
            role: LocationRole::Pickup,
        })
        .expect("device position inside region");

    assert_eq!(
        session.locations().point(LocationRole::Pickup),
        Some(pickup_point())
    );
}

#[rstest]
fn device_location_failure_leaves_state_intact(view: RecordingRouteView) {
    let mut session = ready_session(&view).with_locator(StubLocator::with_error(
        DeviceLocationError::PermissionDenied,
    ));
    let before = session.locations().clone();

    let err = session
        .dispatch(SessionEvent::LocateDevice {
            role: LocationRole::Pickup,
        })
        .expect_err("permission denied");

    assert_eq!(
        err,
        SessionError::DeviceLocation(DeviceLocationError::PermissionDenied)
    );
    assert_eq!(session.locations(), &before);
}

#[rstest]
fn device_location_outside_region_is_rejected() {
    let mut session = Session::new(SessionConfig::default(), StubRouteProvider::failing())
        .with_locator(StubLocator::with_point(GeoPoint::unchecked(51.5, -0.1)));

    let err = session
        .dispatch(SessionEvent::LocateDevice {
            role: LocationRole::Delivery,
        })
        .expect_err("London is outside Uganda");

    assert!(matches!(err, SessionError::OutOfBounds(_)));
    assert_eq!(session.locations().point(LocationRole::Delivery), None);
}

#[rstest]
fn snapshot_requires_a_route(view: RecordingRouteView) {
    let session = ready_session(&view);
    assert_eq!(
        session.snapshot(details()),
        Err(PreconditionError::MissingRoute)
    );
}

#[rstest]
fn snapshot_is_independent_of_later_changes(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    let route = session.request_route().expect("inputs ready");
    let request = session.snapshot(details()).expect("snapshot");

    session.clear(LocationRole::Pickup);

    assert_eq!(request.route, route);
    assert_eq!(request.pickup.point, Some(pickup_point()));
    assert_eq!(request.vehicle, VehicleClass::Car);
}

#[rstest]
fn failed_submission_still_completes(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    session.request_route().expect("inputs ready");
    let target = RecordingSubmissionTarget::failing_with(SubmissionError::Rejected {
        url: "http://forms.invalid".to_owned(),
        status: 500,
    });

    let receipt = session.submit(details(), &target).expect("snapshot taken");

    assert!(!receipt.delivered());
    assert_eq!(target.received().len(), 1);
}

#[rstest]
fn accepted_submission_is_delivered(view: RecordingRouteView) {
    let mut session = ready_session(&view);
    session.request_route().expect("inputs ready");
    let target = RecordingSubmissionTarget::accepting();

    let receipt = session.submit(details(), &target).expect("snapshot taken");

    assert!(receipt.delivered());
    assert_eq!(target.received(), vec![receipt.request]);
}
