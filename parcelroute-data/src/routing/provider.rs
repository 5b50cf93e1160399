//! HTTP-based `RouteProvider` using the OpenRouteService directions API.

use std::time::Duration;

use geo::{Coord, LineString};
use log::debug;
use parcelroute_core::{GeoPoint, RouteProvider, RoutedPath, RoutingError, VehicleClass};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use url::Url;

use super::ors::{DirectionsRequest, DirectionsResponse, ErrorResponse};
use crate::blocking::{BlockingClient, excerpt};
use crate::{DEFAULT_USER_AGENT, ProviderBuildError};

/// Public OpenRouteService endpoint.
pub const DEFAULT_ROUTING_BASE_URL: &str = "https://api.openrouteservice.org";

/// Profile used for motorcycles; the service has no motorcycle profile.
pub const DEFAULT_MOTORCYCLE_PROFILE: &str = "cycling-regular";

/// Profile used for cars.
pub const DEFAULT_CAR_PROFILE: &str = "driving-car";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ERROR_EXCERPT_CHARS: usize = 200;

/// Configuration for [`HttpRouteProvider`].
#[derive(Clone)]
pub struct HttpRouteProviderConfig {
    /// Service root, e.g. `"https://api.openrouteservice.org"`.
    pub base_url: String,
    /// Key sent in the `Authorization` header.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Routing profile for [`VehicleClass::Motorcycle`].
    pub motorcycle_profile: String,
    /// Routing profile for [`VehicleClass::Car`].
    pub car_profile: String,
}

impl std::fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("motorcycle_profile", &self.motorcycle_profile)
            .field("car_profile", &self.car_profile)
            .finish()
    }
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ROUTING_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            motorcycle_profile: DEFAULT_MOTORCYCLE_PROFILE.to_owned(),
            car_profile: DEFAULT_CAR_PROFILE.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the routing profile for `vehicle`.
    #[must_use]
    pub fn with_profile(mut self, vehicle: VehicleClass, profile: impl Into<String>) -> Self {
        match vehicle {
            VehicleClass::Motorcycle => self.motorcycle_profile = profile.into(),
            VehicleClass::Car => self.car_profile = profile.into(),
        }
        self
    }

    /// Routing profile for `vehicle`.
    #[must_use]
    pub fn profile(&self, vehicle: VehicleClass) -> &str {
        match vehicle {
            VehicleClass::Motorcycle => &self.motorcycle_profile,
            VehicleClass::Car => &self.car_profile,
        }
    }
}

/// Road routing over the OpenRouteService directions API.
///
/// Implements the synchronous [`RouteProvider`] trait by blocking on an
/// internal runtime, or on the caller's multi-threaded runtime when there is
/// one.
///
/// # Examples
///
/// ```no_run
/// use parcelroute_core::{GeoPoint, RouteProvider, VehicleClass};
/// use parcelroute_data::{HttpRouteProvider, HttpRouteProviderConfig};
///
/// let config = HttpRouteProviderConfig::default().with_api_key("my-key");
/// let provider = HttpRouteProvider::with_config(config)?;
/// let path = provider.directions(
///     &GeoPoint::new(0.3476, 32.5825)?,
///     &GeoPoint::new(0.35, 32.60)?,
///     VehicleClass::Car,
/// )?;
/// println!("{} m", path.distance_m);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpRouteProvider {
    http: BlockingClient,
    config: HttpRouteProviderConfig,
}

impl HttpRouteProvider {
    /// Create a provider for the service at `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or if the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute URL that can
    /// carry a path, or if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        check_base_url(&config.base_url)?;
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// `{base_url}/v2/directions/{profile}/geojson`.
    fn directions_url(&self, vehicle: VehicleClass) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile(vehicle)
        )
    }

    async fn fetch_directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        vehicle: VehicleClass,
    ) -> Result<RoutedPath, RoutingError> {
        let url = self.directions_url(vehicle);
        let body = DirectionsRequest {
            coordinates: [from.lon_lat(), to.lon_lat()],
            instructions: false,
        };
        debug!("requesting {vehicle} directions from {from} to {to}");

        let mut request = self
            .http
            .client()
            .post(&url)
            .header(ACCEPT, "application/json, application/geo+json")
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        if !status.is_success() {
            return Err(convert_error_body(&url, status.as_u16(), &text));
        }

        let parsed: DirectionsResponse =
            serde_json::from_str(&text).map_err(|err| RoutingError::Parse {
                message: err.to_string(),
            })?;
        convert_response(parsed)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return RoutingError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        RoutingError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Map a non-success body to `Service` when it is a recognised error
/// payload, otherwise to `Http`.
fn convert_error_body(url: &str, status: u16, body: &str) -> RoutingError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(payload) => {
            let (code, message) = payload.error.into_parts();
            RoutingError::Service { code, message }
        }
        Err(_) => RoutingError::Http {
            url: url.to_owned(),
            status,
            message: excerpt(body, ERROR_EXCERPT_CHARS),
        },
    }
}

fn check_base_url(base_url: &str) -> Result<(), ProviderBuildError> {
    let endpoint = |source| ProviderBuildError::Endpoint {
        url: base_url.to_owned(),
        source,
    };
    let url = Url::parse(base_url).map_err(endpoint)?;
    if url.cannot_be_a_base() {
        return Err(endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    Ok(())
}

fn convert_response(response: DirectionsResponse) -> Result<RoutedPath, RoutingError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(RoutingError::EmptyRoute)?;
    let totals = feature.totals().ok_or_else(|| RoutingError::Parse {
        message: "route has neither segments nor a summary".to_owned(),
    })?;

    let coords = feature
        .geometry
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(RoutingError::Parse {
                message: format!("position has {} ordinates, expected 2", position.len()),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoutedPath {
        distance_m: totals.distance,
        duration_s: totals.duration,
        geometry: LineString::new(coords),
    })
}

impl RouteProvider for HttpRouteProvider {
    /// Fetch the path for `vehicle` between two points.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime the runtime must be multi-threaded;
    /// a `current_thread` caller is blocked while the internal runtime runs
    /// the request.
    fn directions(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        vehicle: VehicleClass,
    ) -> Result<RoutedPath, RoutingError> {
        self.http.block_on(self.fetch_directions(from, to, vehicle))
    }
}
