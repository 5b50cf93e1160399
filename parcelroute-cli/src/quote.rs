//! Quote command implementation for the parcelroute CLI.

use std::io::Write;

use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parcelroute_core::{
    GeoPoint, LocationRole, PointOrigin, RouteProvider, RouteResult, Session, SessionConfig,
    SessionError, SessionEvent, VehicleClass,
};
use parcelroute_data::{HttpRouteProvider, HttpRouteProviderConfig};
use serde::{Deserialize, Serialize};

use crate::coordinates::parse_point;
use crate::{
    ARG_DELIVERY, ARG_ORS_API_KEY, ARG_ORS_BASE_URL, ARG_PICKUP, ARG_VEHICLE, CliError,
    ENV_QUOTE_DELIVERY, ENV_QUOTE_PICKUP, ENV_QUOTE_VEHICLE,
};

/// CLI arguments for the `quote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Quote a delivery by routing between the pickup and delivery \
                 points with OpenRouteService. When routing fails the quote \
                 falls back to a straight-line estimate. Both points must lie \
                 inside the service area.",
    about = "Quote a delivery between two points"
)]
#[ortho_config(prefix = "PARCELROUTE")]
pub(crate) struct QuoteArgs {
    /// Pickup point as LAT,LON.
    #[arg(long = ARG_PICKUP, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) pickup: Option<String>,
    /// Delivery point as LAT,LON.
    #[arg(long = ARG_DELIVERY, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) delivery: Option<String>,
    /// Vehicle class: motorcycle or car.
    #[arg(long = ARG_VEHICLE, value_name = "class")]
    #[serde(default)]
    pub(crate) vehicle: Option<String>,
    /// Base URL for the OpenRouteService API.
    #[arg(long = ARG_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// OpenRouteService API key.
    #[arg(long = ARG_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
}

impl QuoteArgs {
    pub(crate) fn into_config(self) -> Result<QuoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QuoteConfig::try_from(merged)
    }
}

/// Resolved `quote` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuoteConfig {
    /// Where the parcel is collected.
    pub(crate) pickup: GeoPoint,
    /// Where the parcel is dropped off.
    pub(crate) delivery: GeoPoint,
    /// Vehicle class to route and price for.
    pub(crate) vehicle: VehicleClass,
    /// Base URL for the directions service.
    pub(crate) ors_base_url: String,
    /// Key for the directions service.
    pub(crate) ors_api_key: Option<String>,
}

impl TryFrom<QuoteArgs> for QuoteConfig {
    type Error = CliError;

    fn try_from(args: QuoteArgs) -> Result<Self, Self::Error> {
        let pickup = args.pickup.ok_or(CliError::MissingArgument {
            field: ARG_PICKUP,
            env: ENV_QUOTE_PICKUP,
        })?;
        let delivery = args.delivery.ok_or(CliError::MissingArgument {
            field: ARG_DELIVERY,
            env: ENV_QUOTE_DELIVERY,
        })?;
        let vehicle = args.vehicle.ok_or(CliError::MissingArgument {
            field: ARG_VEHICLE,
            env: ENV_QUOTE_VEHICLE,
        })?;

        let default_base_url = HttpRouteProviderConfig::default().base_url;
        Ok(Self {
            pickup: parse_point(ARG_PICKUP, &pickup)?,
            delivery: parse_point(ARG_DELIVERY, &delivery)?,
            vehicle: vehicle.parse()?,
            ors_base_url: args.ors_base_url.unwrap_or(default_base_url),
            ors_api_key: args.ors_api_key.filter(|key| !key.trim().is_empty()),
        })
    }
}

/// JSON document printed by the `quote` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct QuoteReport {
    /// Pickup point.
    pub(crate) pickup: GeoPoint,
    /// Delivery point.
    pub(crate) delivery: GeoPoint,
    /// Vehicle class quoted for.
    pub(crate) vehicle: VehicleClass,
    /// Route and price.
    pub(crate) route: RouteResult,
}

/// Builds the route provider for the current quote invocation.
pub(super) trait QuoteProviderBuilder {
    fn build(&self, config: &QuoteConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(super) struct DefaultQuoteProviderBuilder;

impl QuoteProviderBuilder for DefaultQuoteProviderBuilder {
    fn build(&self, config: &QuoteConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        let mut provider_config = HttpRouteProviderConfig::new(config.ors_base_url.clone());
        if let Some(key) = &config.ors_api_key {
            provider_config = provider_config.with_api_key(key.clone());
        }
        let provider = HttpRouteProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildProvider {
                service: "routing",
                base_url: config.ors_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(super) fn run_quote(args: QuoteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultQuoteProviderBuilder;
    run_quote_with(args, &builder, &mut stdout)
}

pub(super) fn run_quote_with(
    args: QuoteArgs,
    builder: &dyn QuoteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_quote(&config, builder)?;
    write_report(writer, &report)
}

/// Drive a session through the same events a form would raise.
pub(super) fn execute_quote(
    config: &QuoteConfig,
    builder: &dyn QuoteProviderBuilder,
) -> Result<QuoteReport, CliError> {
    let provider = builder.build(config)?;
    let mut session = Session::new(SessionConfig::default(), provider);

    for (role, point) in [
        (LocationRole::Pickup, config.pickup),
        (LocationRole::Delivery, config.delivery),
    ] {
        session.dispatch(SessionEvent::SelectPoint {
            role,
            point,
            origin: PointOrigin::Search,
            label: None,
        })?;
    }
    session.dispatch(SessionEvent::SelectVehicle {
        vehicle: config.vehicle,
    })?;

    let route = session.request_route().map_err(SessionError::from)?;
    info!(
        "quoted {} for {:.2} km by {}",
        route.cost_estimate, route.distance_km, config.vehicle
    );

    Ok(QuoteReport {
        pickup: config.pickup,
        delivery: config.delivery,
        vehicle: config.vehicle,
        route,
    })
}

pub(super) fn write_report<T: Serialize>(writer: &mut dyn Write, report: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QuoteConfig, CliError> {
    let merged = QuoteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QuoteConfig::try_from(merged)
}
