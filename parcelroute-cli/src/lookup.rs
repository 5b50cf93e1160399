//! Lookup command implementation for the parcelroute CLI.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parcelroute_core::{AddressLookup, AddressResolver, DEFAULT_COUNTRY_NAME, GeoPoint, ReverseGeocoder};
use parcelroute_data::{HttpReverseGeocoder, HttpReverseGeocoderConfig};
use serde::{Deserialize, Serialize};

use crate::coordinates::parse_point;
use crate::quote::write_report;
use crate::{ARG_COUNTRY, ARG_NOMINATIM_BASE_URL, ARG_POINT, CliError, ENV_LOOKUP_POINT};

/// CLI arguments for the `lookup` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Reverse geocode a point with Nominatim. Lookup failures are \
                 reported as unavailable rather than as errors, and addresses \
                 outside the expected country are flagged.",
    about = "Look up the address at a point"
)]
#[ortho_config(prefix = "PARCELROUTE")]
pub(crate) struct LookupArgs {
    /// Point as LAT,LON.
    #[arg(long = ARG_POINT, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) point: Option<String>,
    /// Base URL for the Nominatim API.
    #[arg(long = ARG_NOMINATIM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
    /// Country the address is expected in.
    #[arg(long = ARG_COUNTRY, value_name = "name")]
    #[serde(default)]
    pub(crate) country: Option<String>,
}

impl LookupArgs {
    pub(crate) fn into_config(self) -> Result<LookupConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LookupConfig::try_from(merged)
    }
}

/// Resolved `lookup` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LookupConfig {
    pub(crate) point: GeoPoint,
    pub(crate) nominatim_base_url: String,
    pub(crate) country: String,
}

impl TryFrom<LookupArgs> for LookupConfig {
    type Error = CliError;

    fn try_from(args: LookupArgs) -> Result<Self, Self::Error> {
        let point = args.point.ok_or(CliError::MissingArgument {
            field: ARG_POINT,
            env: ENV_LOOKUP_POINT,
        })?;
        Ok(Self {
            point: parse_point(ARG_POINT, &point)?,
            nominatim_base_url: args
                .nominatim_base_url
                .unwrap_or_else(|| HttpReverseGeocoderConfig::default().base_url),
            country: args
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY_NAME.to_owned()),
        })
    }
}

/// JSON document printed by the `lookup` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LookupReport {
    pub(crate) point: GeoPoint,
    pub(crate) lookup: AddressLookup,
}

/// Builds the reverse geocoder for the current lookup invocation.
pub(super) trait LookupGeocoderBuilder {
    fn build(&self, config: &LookupConfig) -> Result<Box<dyn ReverseGeocoder>, CliError>;
}

pub(super) struct DefaultLookupGeocoderBuilder;

impl LookupGeocoderBuilder for DefaultLookupGeocoderBuilder {
    fn build(&self, config: &LookupConfig) -> Result<Box<dyn ReverseGeocoder>, CliError> {
        let geocoder = HttpReverseGeocoder::new(config.nominatim_base_url.clone()).map_err(
            |source| CliError::BuildProvider {
                service: "geocoding",
                base_url: config.nominatim_base_url.clone(),
                source,
            },
        )?;
        Ok(Box::new(geocoder))
    }
}

pub(super) fn run_lookup(args: LookupArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultLookupGeocoderBuilder;
    run_lookup_with(args, &builder, &mut stdout)
}

pub(super) fn run_lookup_with(
    args: LookupArgs,
    builder: &dyn LookupGeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let resolver = AddressResolver::new(builder.build(&config)?, config.country.clone());
    let report = LookupReport {
        point: config.point,
        lookup: resolver.lookup(&config.point),
    };
    write_report(writer, &report)
}
