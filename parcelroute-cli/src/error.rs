//! Error types emitted by the parcelroute CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use parcelroute_core::{GeoPointError, ParseVehicleClassError, SessionError};
use parcelroute_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the parcelroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A coordinate option is not of the form `LAT,LON`.
    #[error("{field} value {value:?} is not of the form LAT,LON")]
    MalformedCoordinate {
        /// Flag name.
        field: &'static str,
        /// Text supplied.
        value: String,
    },
    /// A coordinate option is outside the valid latitude/longitude range.
    #[error("{field} value is not a valid coordinate: {source}")]
    InvalidCoordinate {
        /// Flag name.
        field: &'static str,
        /// Range failure.
        #[source]
        source: GeoPointError,
    },
    /// The vehicle option names no known class.
    #[error(transparent)]
    UnknownVehicle(#[from] ParseVehicleClassError),
    /// Constructing an HTTP adapter failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildProvider {
        /// Which service the client talks to.
        service: &'static str,
        /// Configured endpoint.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The session rejected an input.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
