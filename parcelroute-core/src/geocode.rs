//! Best-effort reverse geocoding.
//!
//! Address lookups only enrich the form: a failed lookup, or one that lands
//! in the wrong country, never retracts an accepted point.

use log::warn;
use thiserror::Error;

use crate::GeoPoint;

/// A human-readable address returned by a geocoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Full address line.
    pub display_name: String,
    /// Country name as reported by the geocoder.
    pub country: String,
}

/// Errors from [`ReverseGeocoder::reverse_lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    /// The request could not be completed.
    #[error("geocoding request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Failure description.
        message: String,
    },
    /// The geocoder reported an error or returned an unusable body.
    #[error("geocoding service error: {message}")]
    Service {
        /// Error description.
        message: String,
    },
    /// No geocoder is configured.
    #[error("no geocoder configured")]
    Unconfigured,
}

/// Translate a point into an address.
pub trait ReverseGeocoder {
    /// Look up the address at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError`] when the lookup cannot be completed.
    fn reverse_lookup(&self, point: &GeoPoint) -> Result<Address, GeocodingError>;
}

impl<G: ReverseGeocoder + ?Sized> ReverseGeocoder for Box<G> {
    fn reverse_lookup(&self, point: &GeoPoint) -> Result<Address, GeocodingError> {
        (**self).reverse_lookup(point)
    }
}

/// Geocoder used when none is configured; every lookup is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeocoder;

impl ReverseGeocoder for NoGeocoder {
    fn reverse_lookup(&self, _point: &GeoPoint) -> Result<Address, GeocodingError> {
        Err(GeocodingError::Unconfigured)
    }
}

/// Outcome of a best-effort lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum AddressLookup {
    /// Address resolved inside the expected country.
    Matched {
        /// Resolved address.
        address: Address,
    },
    /// Address resolved, but in a different country.
    CountryMismatch {
        /// Resolved address.
        address: Address,
        /// Country the session serves.
        expected: String,
    },
    /// The lookup failed; nothing to fill in.
    Unavailable,
}

impl AddressLookup {
    /// Text to prefill the address field with, if any.
    ///
    /// Only matched lookups yield text.
    #[must_use]
    pub fn autofill_text(&self) -> Option<&str> {
        match self {
            Self::Matched { address } => Some(address.display_name.as_str()),
            Self::CountryMismatch { .. } | Self::Unavailable => None,
        }
    }

    /// `true` when the caller should warn about the country.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::CountryMismatch { .. })
    }
}

/// Wraps a [`ReverseGeocoder`] so that failures degrade to
/// [`AddressLookup::Unavailable`] and foreign results are flagged.
///
/// # Examples
///
/// ```
/// use parcelroute_core::{AddressLookup, AddressResolver, GeoPoint, NoGeocoder};
///
/// let resolver = AddressResolver::new(NoGeocoder, "Uganda");
/// let lookup = resolver.lookup(&GeoPoint::unchecked(0.3476, 32.5825));
/// assert_eq!(lookup, AddressLookup::Unavailable);
/// ```
#[derive(Debug, Clone)]
pub struct AddressResolver<G> {
    geocoder: G,
    expected_country: String,
}

impl<G: ReverseGeocoder> AddressResolver<G> {
    /// Wraps `geocoder`, expecting results in `expected_country`.
    pub fn new(geocoder: G, expected_country: impl Into<String>) -> Self {
        Self {
            geocoder,
            expected_country: expected_country.into(),
        }
    }

    /// Look up the address at `point`. Never fails.
    pub fn lookup(&self, point: &GeoPoint) -> AddressLookup {
        match self.geocoder.reverse_lookup(point) {
            Ok(address) if country_matches(&address.country, &self.expected_country) => {
                AddressLookup::Matched { address }
            }
            Ok(address) => {
                warn!(
                    "{point} resolved to {:?} in {:?}, expected {:?}",
                    address.display_name, address.country, self.expected_country
                );
                AddressLookup::CountryMismatch {
                    address,
                    expected: self.expected_country.clone(),
                }
            }
            Err(err) => {
                warn!("reverse geocoding {point} failed: {err}");
                AddressLookup::Unavailable
            }
        }
    }
}

/// Case-insensitive substring match of `expected` within `reported`.
fn country_matches(reported: &str, expected: &str) -> bool {
    reported
        .to_lowercase()
        .contains(&expected.to_lowercase())
}
