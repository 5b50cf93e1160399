use thiserror::Error;

use crate::{DeviceLocationError, LocationRole, OutOfBoundsError};

/// An operation was requested before its inputs were in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// No point is stored for the role.
    #[error("no {role} location has been set")]
    MissingLocation {
        /// The empty role.
        role: LocationRole,
    },
    /// The stored point no longer lies inside the permitted region.
    #[error("the {role} location lies outside the permitted service area")]
    LocationOutOfBounds {
        /// The offending role.
        role: LocationRole,
    },
    /// No vehicle class has been selected.
    #[error("no vehicle class has been selected")]
    MissingVehicle,
    /// No current route exists to submit.
    #[error("no route has been computed for the current locations")]
    MissingRoute,
    /// A required contact field is blank.
    #[error("{field} must not be blank")]
    MissingDetail {
        /// Name of the blank field.
        field: &'static str,
    },
}

/// A session operation was rejected; session state is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// A selected point fell outside the permitted region.
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),
    /// The operation's inputs were not ready.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// The device position could not be obtained.
    #[error("could not determine device location: {0}")]
    DeviceLocation(#[from] DeviceLocationError),
}
