//! Nominatim reverse-geocoding wire types (`format=jsonv2`).
//!
//! Nominatim reports lookup failures such as open water with HTTP 200 and
//! an `error` member instead of an address.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Reverse/>

use parcelroute_core::{Address, GeocodingError};
use serde::Deserialize;

/// Reverse lookup response.
#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    /// Full address line.
    pub display_name: Option<String>,
    /// Structured address parts, present with `addressdetails=1`.
    #[serde(default)]
    pub address: AddressDetails,
    /// Failure description.
    pub error: Option<String>,
}

/// The subset of address parts the estimator uses.
#[derive(Debug, Default, Deserialize)]
pub struct AddressDetails {
    /// Country name in the requested language.
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 code, lower case.
    pub country_code: Option<String>,
}

impl ReverseResponse {
    /// Convert into a core [`Address`].
    pub fn into_address(self) -> Result<Address, GeocodingError> {
        if let Some(message) = self.error {
            return Err(GeocodingError::Service { message });
        }
        let display_name = self
            .display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| GeocodingError::Service {
                message: "response missing display_name".to_owned(),
            })?;
        Ok(Address {
            display_name,
            country: self.address.country.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_address() {
        let json = r#"{
            "place_id": 1234,
            "lat": "0.3476",
            "lon": "32.5825",
            "display_name": "Kampala Road, Nakasero, Kampala, Central Region, Uganda",
            "address": {
                "road": "Kampala Road",
                "city": "Kampala",
                "country": "Uganda",
                "country_code": "ug"
            }
        }"#;

        let response: ReverseResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(response.address.country_code.as_deref(), Some("ug"));
        let address = response.into_address().expect("should convert");
        assert_eq!(address.country, "Uganda");
        assert!(address.display_name.starts_with("Kampala Road"));
    }

    #[test]
    fn error_member_maps_to_service_error() {
        let json = r#"{"error": "Unable to geocode"}"#;

        let response: ReverseResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(
            response.into_address(),
            Err(GeocodingError::Service {
                message: "Unable to geocode".to_owned()
            })
        );
    }

    #[test]
    fn missing_country_yields_empty_country() {
        let json = r#"{"display_name": "Lake Victoria"}"#;

        let response: ReverseResponse = serde_json::from_str(json).expect("should deserialise");

        let address = response.into_address().expect("should convert");
        assert_eq!(address.country, "");
    }
}
