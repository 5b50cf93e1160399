use thiserror::Error;

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint URL {url:?}: {source}")]
    Endpoint {
        /// Offending URL text.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}
