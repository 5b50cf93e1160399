//! Delivery request snapshots and their submission.

use thiserror::Error;

use crate::{LocationEntry, PreconditionError, RouteResult, RouteSource, VehicleClass};

/// Name and phone number of one party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactDetails {
    /// Full name.
    pub name: String,
    /// Phone number as entered.
    pub phone: String,
}

impl ContactDetails {
    /// Creates contact details.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Identity and parcel fields entered alongside the locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryDetails {
    /// Who hands the parcel over.
    pub sender: ContactDetails,
    /// Who receives the parcel.
    pub recipient: ContactDetails,
    /// What is being sent.
    pub parcel_description: Option<String>,
    /// Free-form instructions for the courier.
    pub notes: Option<String>,
}

impl DeliveryDetails {
    /// Checks that every required field holds text.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingDetail`] naming the first blank
    /// required field.
    pub fn validate(&self) -> Result<(), PreconditionError> {
        let required = [
            ("sender_name", &self.sender.name),
            ("sender_phone", &self.sender.phone),
            ("recipient_name", &self.recipient.name),
            ("recipient_phone", &self.recipient.phone),
        ];
        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(PreconditionError::MissingDetail { field }),
            None => Ok(()),
        }
    }
}

/// Everything known about a delivery at submission time.
///
/// Built by [`Session::snapshot`](crate::Session::snapshot); later session
/// changes do not affect an existing snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRequest {
    /// Contact and parcel fields.
    pub details: DeliveryDetails,
    /// Pickup entry.
    pub pickup: LocationEntry,
    /// Delivery entry.
    pub delivery: LocationEntry,
    /// Selected vehicle class.
    pub vehicle: VehicleClass,
    /// Most recent route and quote.
    pub route: RouteResult,
}

impl DeliveryRequest {
    /// Flattens the request into named form fields, in a stable order.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let coordinates = |entry: &LocationEntry| {
            entry
                .point
                .map(|p| format!("{:.6},{:.6}", p.latitude(), p.longitude()))
                .unwrap_or_default()
        };
        let source = match self.route.source {
            RouteSource::Primary => "routed",
            RouteSource::Fallback => "estimated",
        };
        vec![
            ("sender_name", self.details.sender.name.clone()),
            ("sender_phone", self.details.sender.phone.clone()),
            ("recipient_name", self.details.recipient.name.clone()),
            ("recipient_phone", self.details.recipient.phone.clone()),
            ("pickup_address", text(&self.pickup.address)),
            ("pickup_coordinates", coordinates(&self.pickup)),
            ("delivery_address", text(&self.delivery.address)),
            ("delivery_coordinates", coordinates(&self.delivery)),
            ("vehicle", self.vehicle.as_str().to_owned()),
            ("distance_km", format!("{:.2}", self.route.distance_km)),
            ("duration_min", self.route.duration_min.to_string()),
            ("cost_estimate", self.route.cost_estimate.to_string()),
            ("route_source", source.to_owned()),
            ("parcel_description", text(&self.details.parcel_description)),
            ("notes", text(&self.details.notes)),
        ]
    }
}

/// Errors from [`SubmissionTarget::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The request could not be delivered.
    #[error("submission to {url} failed: {message}")]
    Network {
        /// Target URL.
        url: String,
        /// Failure description.
        message: String,
    },
    /// The target answered with a non-success status.
    #[error("submission to {url} returned HTTP {status}")]
    Rejected {
        /// Target URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Receives submitted delivery requests.
pub trait SubmissionTarget {
    /// Deliver `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] when delivery fails.
    fn submit(&self, request: &DeliveryRequest) -> Result<(), SubmissionError>;
}

impl<T: SubmissionTarget + ?Sized> SubmissionTarget for Box<T> {
    fn submit(&self, request: &DeliveryRequest) -> Result<(), SubmissionError> {
        (**self).submit(request)
    }
}

/// Result of a fire-and-forget submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// The snapshot that was sent.
    pub request: DeliveryRequest,
    /// Why delivery failed, if it did.
    pub failure: Option<SubmissionError>,
}

impl SubmissionReceipt {
    /// `true` when the target accepted the request.
    #[must_use]
    pub const fn delivered(&self) -> bool {
        self.failure.is_none()
    }
}
