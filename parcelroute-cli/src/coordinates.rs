//! `LAT,LON` option parsing.

use parcelroute_core::GeoPoint;

use crate::CliError;

/// Parse `"LAT,LON"` (whitespace around either number is ignored).
pub(crate) fn parse_point(field: &'static str, text: &str) -> Result<GeoPoint, CliError> {
    let malformed = || CliError::MalformedCoordinate {
        field,
        value: text.to_owned(),
    };
    let (lat, lon) = text.split_once(',').ok_or_else(malformed)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let longitude: f64 = lon.trim().parse().map_err(|_| malformed())?;
    GeoPoint::new(latitude, longitude).map_err(|source| CliError::InvalidCoordinate { field, source })
}
