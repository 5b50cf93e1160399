//! Delivery request submission to a form endpoint.
//!
//! [`HttpSubmissionTarget`] posts
//! [`DeliveryRequest::form_fields`](parcelroute_core::DeliveryRequest::form_fields)
//! as `application/x-www-form-urlencoded`. The session treats submission as
//! fire-and-forget, so failures only surface on the receipt.

use std::time::Duration;

use log::{debug, info};
use parcelroute_core::{DeliveryRequest, SubmissionError, SubmissionTarget};
use url::Url;

use crate::blocking::BlockingClient;
use crate::{DEFAULT_USER_AGENT, ProviderBuildError};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for [`HttpSubmissionTarget`].
#[derive(Debug, Clone)]
pub struct HttpSubmissionTargetConfig {
    /// Form endpoint receiving the POST.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpSubmissionTargetConfig {
    /// Create a configuration posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
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
}

/// Posts delivery requests to a form endpoint.
#[derive(Debug)]
pub struct HttpSubmissionTarget {
    http: BlockingClient,
    endpoint: Url,
    timeout: Duration,
}

impl HttpSubmissionTarget {
    /// Create a target posting to `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute URL or the HTTP
    /// client or Tokio runtime fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpSubmissionTargetConfig::new(endpoint))
    }

    /// Create a target with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute URL or the HTTP
    /// client or Tokio runtime fails to build.
    pub fn with_config(config: HttpSubmissionTargetConfig) -> Result<Self, ProviderBuildError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|source| ProviderBuildError::Endpoint {
                url: config.endpoint.clone(),
                source,
            })?;
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            http,
            endpoint,
            timeout: config.timeout,
        })
    }

    async fn post_form(&self, request: &DeliveryRequest) -> Result<(), SubmissionError> {
        let url = self.endpoint.as_str();
        let fields = request.form_fields();
        debug!("submitting delivery request with {} fields", fields.len());

        let response = self
            .http
            .client()
            .post(self.endpoint.clone())
            .form(&fields)
            .send()
            .await
            .map_err(|err| SubmissionError::Network {
                url: url.to_owned(),
                message: if err.is_timeout() {
                    format!("timed out after {}s", self.timeout.as_secs())
                } else {
                    err.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        info!("delivery request accepted by {url}");
        Ok(())
    }
}

impl SubmissionTarget for HttpSubmissionTarget {
    fn submit(&self, request: &DeliveryRequest) -> Result<(), SubmissionError> {
        self.http.block_on(self.post_form(request))
    }
}
