//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use parcelroute_cli::CliError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match parcelroute_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("parcelroute: {err}");
            std::process::exit(1);
        }
    }
}
