//! Reverse geocoding over HTTP.
//!
//! [`HttpReverseGeocoder`] implements [`parcelroute_core::ReverseGeocoder`]
//! against a Nominatim server. Wrap it in
//! [`parcelroute_core::AddressResolver`] to get best-effort lookups with the
//! country check applied.

mod nominatim;
mod provider;

pub use provider::{DEFAULT_GEOCODING_BASE_URL, HttpReverseGeocoder, HttpReverseGeocoderConfig};
