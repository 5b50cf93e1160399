//! Command-line interface for quoting parcel deliveries.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod coordinates;
mod error;
mod lookup;
mod quote;

pub use error::CliError;

use lookup::{LookupArgs, run_lookup};
use quote::{QuoteArgs, run_quote};

const ARG_PICKUP: &str = "pickup";
const ARG_DELIVERY: &str = "delivery";
const ARG_VEHICLE: &str = "vehicle";
const ARG_ORS_BASE_URL: &str = "ors-base-url";
const ARG_ORS_API_KEY: &str = "ors-api-key";
const ARG_POINT: &str = "point";
const ARG_NOMINATIM_BASE_URL: &str = "nominatim-base-url";
const ARG_COUNTRY: &str = "country";
const ENV_QUOTE_PICKUP: &str = "PARCELROUTE_CMDS_QUOTE_PICKUP";
const ENV_QUOTE_DELIVERY: &str = "PARCELROUTE_CMDS_QUOTE_DELIVERY";
const ENV_QUOTE_VEHICLE: &str = "PARCELROUTE_CMDS_QUOTE_VEHICLE";
const ENV_LOOKUP_POINT: &str = "PARCELROUTE_CMDS_LOOKUP_POINT";

/// Run the parcelroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, a
/// location is rejected, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Quote(args) => run_quote(args),
        Command::Lookup(args) => run_lookup(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "parcelroute",
    about = "Route and price parcel deliveries between two points",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote a delivery between a pickup and a delivery point.
    Quote(QuoteArgs),
    /// Look up the address at a point.
    Lookup(LookupArgs),
}

#[cfg(test)]
mod tests;
