use std::time::Duration;

use log::debug;
use parcelroute_core::{Address, GeoPoint, GeocodingError, ReverseGeocoder};
use url::Url;

use super::nominatim::ReverseResponse;
use crate::blocking::{BlockingClient, excerpt};
use crate::{DEFAULT_USER_AGENT, ProviderBuildError};

/// Public Nominatim endpoint.
pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LANGUAGE: &str = "en";
const ERROR_EXCERPT_CHARS: usize = 200;

/// Configuration for [`HttpReverseGeocoder`].
#[derive(Debug, Clone)]
pub struct HttpReverseGeocoderConfig {
    /// Service root, e.g. `"https://nominatim.openstreetmap.org"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string; the public service requires an identifying one.
    pub user_agent: String,
    /// Value of `accept-language`.
    pub language: String,
}

impl Default for HttpReverseGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODING_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

impl HttpReverseGeocoderConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
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

    /// Set the response language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Reverse geocoder backed by a Nominatim server.
#[derive(Debug)]
pub struct HttpReverseGeocoder {
    http: BlockingClient,
    reverse_url: Url,
    config: HttpReverseGeocoderConfig,
}

impl HttpReverseGeocoder {
    /// Create a geocoder for the service at `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpReverseGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute URL or the HTTP
    /// client or Tokio runtime fails to build.
    pub fn with_config(config: HttpReverseGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let reverse_url = reverse_endpoint(&config.base_url)?;
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            http,
            reverse_url,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpReverseGeocoderConfig {
        &self.config
    }

    fn lookup_url(&self, point: &GeoPoint) -> Url {
        let mut url = self.reverse_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("lat", &point.latitude().to_string())
            .append_pair("lon", &point.longitude().to_string())
            .append_pair("addressdetails", "1")
            .append_pair("accept-language", &self.config.language);
        url
    }

    async fn fetch_address(&self, point: &GeoPoint) -> Result<Address, GeocodingError> {
        let url = self.lookup_url(point);
        debug!("reverse geocoding {point}");

        let response = self
            .http
            .client()
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        if !status.is_success() {
            return Err(GeocodingError::Service {
                message: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    excerpt(&text, ERROR_EXCERPT_CHARS)
                ),
            });
        }

        let parsed: ReverseResponse =
            serde_json::from_str(&text).map_err(|err| GeocodingError::Service {
                message: format!("malformed response: {err}"),
            })?;
        parsed.into_address()
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> GeocodingError {
        let message = if error.is_timeout() {
            format!("timed out after {}s", self.config.timeout.as_secs())
        } else {
            error.to_string()
        };
        GeocodingError::Network {
            url: url.to_string(),
            message,
        }
    }
}

/// `{base_url}/reverse`, validated once at construction.
fn reverse_endpoint(base_url: &str) -> Result<Url, ProviderBuildError> {
    let endpoint = |source| ProviderBuildError::Endpoint {
        url: base_url.to_owned(),
        source,
    };
    let mut url = Url::parse(base_url).map_err(endpoint)?;
    url.path_segments_mut()
        .map_err(|()| endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push("reverse");
    Ok(url)
}

impl ReverseGeocoder for HttpReverseGeocoder {
    fn reverse_lookup(&self, point: &GeoPoint) -> Result<Address, GeocodingError> {
        self.http.block_on(self.fetch_address(point))
    }
}
