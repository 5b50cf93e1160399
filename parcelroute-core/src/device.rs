//! Device geolocation with a bounded wait.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::GeoPoint;

/// How long a device position query may take before it fails.
pub const DEFAULT_LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons a device position query fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceLocationError {
    /// The user or platform refused access to the position.
    #[error("location permission denied")]
    PermissionDenied,
    /// No position fix could be obtained.
    #[error("position unavailable")]
    PositionUnavailable,
    /// No answer arrived within the allowed time.
    #[error("position request timed out after {timeout:?}")]
    Timeout {
        /// The wait that elapsed.
        timeout: Duration,
    },
    /// Any other failure.
    #[error("position request failed: {message}")]
    Unknown {
        /// Failure description.
        message: String,
    },
}

/// Source of the device's current position.
pub trait DeviceLocator {
    /// Return the current position, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceLocationError`] when no position is available.
    fn locate(&self, timeout: Duration) -> Result<GeoPoint, DeviceLocationError>;
}

impl<L: DeviceLocator + ?Sized> DeviceLocator for Box<L> {
    fn locate(&self, timeout: Duration) -> Result<GeoPoint, DeviceLocationError> {
        (**self).locate(timeout)
    }
}

/// Locator used when the platform offers no positioning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDeviceLocator;

impl DeviceLocator for NoDeviceLocator {
    fn locate(&self, _timeout: Duration) -> Result<GeoPoint, DeviceLocationError> {
        Err(DeviceLocationError::PositionUnavailable)
    }
}

/// Enforces the timeout on locators that may not honour it.
///
/// The wrapped query runs on a worker thread; if it has not answered when
/// the timeout elapses the caller receives [`DeviceLocationError::Timeout`]
/// and the late answer is discarded.
#[derive(Debug)]
pub struct BoundedLocator<L> {
    inner: Arc<L>,
}

impl<L> BoundedLocator<L> {
    /// Wraps `inner`.
    pub fn new(inner: L) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<L> DeviceLocator for BoundedLocator<L>
where
    L: DeviceLocator + Send + Sync + 'static,
{
    fn locate(&self, timeout: Duration) -> Result<GeoPoint, DeviceLocationError> {
        let (sender, receiver) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        thread::Builder::new()
            .name("device-locate".to_owned())
            .spawn(move || {
                if sender.send(inner.locate(timeout)).is_err() {
                    debug!("device position arrived after the caller stopped waiting");
                }
            })
            .map_err(|err| DeviceLocationError::Unknown {
                message: err.to_string(),
            })?;

        match receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(DeviceLocationError::Timeout { timeout }),
            Err(RecvTimeoutError::Disconnected) => Err(DeviceLocationError::Unknown {
                message: "locator stopped without answering".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubLocator;
    use rstest::rstest;

    #[rstest]
    fn passes_through_prompt_answers() {
        let point = GeoPoint::unchecked(0.3476, 32.5825);
        let locator = BoundedLocator::new(StubLocator::with_point(point));

        assert_eq!(locator.locate(Duration::from_secs(1)), Ok(point));
    }

    #[rstest]
    fn passes_through_errors() {
        let locator = BoundedLocator::new(StubLocator::with_error(
            DeviceLocationError::PermissionDenied,
        ));

        assert_eq!(
            locator.locate(Duration::from_secs(1)),
            Err(DeviceLocationError::PermissionDenied)
        );
    }

    #[rstest]
    fn slow_locator_times_out() {
        let point = GeoPoint::unchecked(0.3476, 32.5825);
        let slow = StubLocator::with_point(point).delayed_by(Duration::from_millis(500));
        let locator = BoundedLocator::new(slow);
        let timeout = Duration::from_millis(20);

        assert_eq!(
            locator.locate(timeout),
            Err(DeviceLocationError::Timeout { timeout })
        );
    }

    #[rstest]
    fn no_device_locator_is_unavailable() {
        assert_eq!(
            NoDeviceLocator.locate(DEFAULT_LOCATE_TIMEOUT),
            Err(DeviceLocationError::PositionUnavailable)
        );
    }
}
