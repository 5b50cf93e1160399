//! OpenRouteService directions wire types.
//!
//! Requests go to `POST /v2/directions/{profile}/geojson`. Successful
//! responses are a GeoJSON `FeatureCollection` whose first feature carries
//! the path geometry and per-segment totals.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs/v2/directions>

use serde::{Deserialize, Serialize};

/// Request body for the directions service.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    /// Waypoints as `[longitude, latitude]`.
    pub coordinates: [[f64; 2]; 2],
    /// Turn-by-turn instructions are never needed.
    pub instructions: bool,
}

/// GeoJSON directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Route alternatives; the first is used.
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// One route in the response.
#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    /// Path geometry.
    pub geometry: LineGeometry,
    /// Route totals.
    #[serde(default)]
    pub properties: RouteProperties,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Positions as `[longitude, latitude]`, optionally followed by
    /// elevation.
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

/// Route totals attached to a feature.
#[derive(Debug, Default, Deserialize)]
pub struct RouteProperties {
    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Whole-route totals, present on most responses.
    pub summary: Option<Segment>,
}

/// Distance and duration of a leg or of the whole route.
///
/// Both fields are required; a leg without them is a malformed body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Segment {
    /// Metres.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

/// Error payload returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error detail.
    pub error: ErrorDetail,
}

/// The service reports structured errors; its gateway reports bare text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// `{"code": 2010, "message": "..."}`.
    Structured {
        /// Numeric error code.
        code: Option<i64>,
        /// Description.
        #[serde(default)]
        message: String,
    },
    /// `"Access to this API has been disallowed"`.
    Text(String),
}

impl ErrorDetail {
    /// Split into `(code, message)`.
    pub fn into_parts(self) -> (String, String) {
        match self {
            Self::Structured { code, message } => {
                (code.map_or_else(|| "unknown".to_owned(), |c| c.to_string()), message)
            }
            Self::Text(message) => ("unknown".to_owned(), message),
        }
    }
}

impl RouteFeature {
    /// Sum of segment totals, or the summary when no segments are listed.
    ///
    /// `None` when the feature carries neither.
    pub fn totals(&self) -> Option<Segment> {
        if self.properties.segments.is_empty() {
            return self.properties.summary;
        }
        let zero = Segment {
            distance: 0.0,
            duration: 0.0,
        };
        Some(
            self.properties
                .segments
                .iter()
                .fold(zero, |acc, seg| Segment {
                    distance: sum(acc.distance, seg.distance),
                    duration: sum(acc.duration, seg.duration),
                }),
        )
    }
}

#[expect(clippy::float_arithmetic, reason = "segment totals are summed")]
fn sum(a: f64, b: f64) -> f64 {
    a + b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_geojson_route() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "bbox": [32.58, 0.34, 32.6, 0.35],
                "properties": {
                    "segments": [
                        {"distance": 1200.5, "duration": 180.0, "steps": []},
                        {"distance": 800.0, "duration": 95.5, "steps": []}
                    ],
                    "summary": {"distance": 2000.5, "duration": 275.5},
                    "way_points": [0, 12]
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[32.5825, 0.3476], [32.59, 0.349], [32.6, 0.35]]
                }
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        let feature = response.features.first().expect("one feature");
        assert_eq!(feature.geometry.coordinates.len(), 3);
        let totals = feature.totals().expect("segments present");
        assert_eq!(totals.distance, 2000.5);
        assert_eq!(totals.duration, 275.5);
    }

    #[test]
    fn totals_fall_back_to_summary() {
        let json = r#"{
            "features": [{
                "properties": {"summary": {"distance": 950.0, "duration": 120.0}},
                "geometry": {"coordinates": [[32.5, 0.3], [32.6, 0.4]]}
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        let totals = response
            .features
            .first()
            .expect("one feature")
            .totals()
            .expect("summary present");
        assert_eq!(totals.distance, 950.0);
        assert_eq!(totals.duration, 120.0);
    }

    #[test]
    fn feature_without_segments_or_summary_has_no_totals() {
        let json = r#"{
            "features": [{
                "properties": {},
                "geometry": {"coordinates": [[32.5825, 0.3476], [32.6, 0.35]]}
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.features.first().expect("one feature").totals().is_none());
    }

    #[test]
    fn segment_without_distance_is_rejected() {
        let json = r#"{
            "features": [{
                "properties": {"segments": [{"duration": 120.0}]},
                "geometry": {"coordinates": [[32.5, 0.3], [32.6, 0.4]]}
            }]
        }"#;

        assert!(serde_json::from_str::<DirectionsResponse>(json).is_err());
    }

    #[test]
    fn deserialise_structured_error() {
        let json = r#"{"error": {"code": 2010, "message": "Could not find routable point"}}"#;

        let response: ErrorResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(
            response.error.into_parts(),
            ("2010".to_owned(), "Could not find routable point".to_owned())
        );
    }

    #[test]
    fn deserialise_gateway_error() {
        let json = r#"{"error": "Access to this API has been disallowed"}"#;

        let response: ErrorResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(
            response.error.into_parts(),
            (
                "unknown".to_owned(),
                "Access to this API has been disallowed".to_owned()
            )
        );
    }

    #[test]
    fn request_serialises_lon_lat_pairs() {
        let request = DirectionsRequest {
            coordinates: [[32.5825, 0.3476], [32.6, 0.35]],
            instructions: false,
        };

        let value = serde_json::to_value(&request).expect("should serialise");

        assert_eq!(
            value,
            serde_json::json!({
                "coordinates": [[32.5825, 0.3476], [32.6, 0.35]],
                "instructions": false
            })
        );
    }
}
