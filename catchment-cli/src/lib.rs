//! Command-line interface for coverage analysis and delivery simulation.
//!
//! Both subcommands read a JSON catalog, locate the delivery point from
//! coordinates or a geocoded address, and print their result as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod query;

pub use error::CliError;
use query::{QueryArgs, QueryKind};

const ARG_CATALOG: &str = "catalog";
const ARG_LAT: &str = "lat";
const ARG_LNG: &str = "lng";
const ARG_ADDRESS: &str = "address";
const ARG_PRODUCT: &str = "product";
const ARG_VARIANT: &str = "variant";
const ARG_ORDER_TYPE: &str = "order-type";
const ARG_QUANTITY: &str = "quantity";
const ARG_GEOCODER_URL: &str = "geocoder-url";
const ARG_OUTPUT: &str = "output";
const ENV_CATALOG: &str = "CATCHMENT_CMDS_QUERY_CATALOG";
const ENV_LAT: &str = "CATCHMENT_CMDS_QUERY_LAT";
const ENV_LNG: &str = "CATCHMENT_CMDS_QUERY_LNG";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, inputs cannot be read,
/// geocoding fails or the result cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Coverage(args) => query::run_query(QueryKind::Coverage, args),
        Command::Simulate(args) => query::run_query(QueryKind::Simulate, args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "catchment",
    about = "Facility coverage analysis and delivery simulation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report every facility's coverage of a delivery location.
    Coverage(QueryArgs),
    /// Pick the fastest facility for a delivery and list alternatives.
    Simulate(QueryArgs),
}

#[cfg(test)]
mod tests;
