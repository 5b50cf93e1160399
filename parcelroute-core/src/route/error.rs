use thiserror::Error;

/// Errors from [`crate::RouteProvider::directions`].
///
/// Every variant is recoverable: [`crate::RouteResolver`] answers all of them
/// with a straight-line estimate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The routing service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success status.
    #[error("request to {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The routing service reported an error in its payload.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service-specific error code.
        code: String,
        /// Service-supplied message.
        message: String,
    },
    /// The response body could not be decoded or held invalid values.
    #[error("malformed routing response: {message}")]
    Parse {
        /// Decoding failure description.
        message: String,
    },
    /// The response decoded but contained no usable route.
    #[error("routing service returned no route")]
    EmptyRoute,
}
