//! Command-line interface for resolving Wayfare destination pages.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use wayfare_core::DestinationKind;

mod error;
mod logging;
mod resolve;

pub use error::CliError;
pub use logging::init_logging;

use resolve::{ResolveArgs, run_resolve};

const ARG_SLUG: &str = "slug";
const ARG_COUNTRY: &str = "country";
const ARG_CATALOG: &str = "catalog";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_SLUG: &str = "WAYFARE_CMDS_RESOLVE_SLUG";

/// Run the Wayfare CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, when
/// the destination cannot be resolved, or when the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Country(args) => run_resolve(DestinationKind::Country, args),
        Command::City(args) => run_resolve(DestinationKind::City, args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfare",
    about = "Resolve travel destination pages from curated and live data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a country page.
    Country(ResolveArgs),
    /// Resolve a city page.
    City(ResolveArgs),
}

#[cfg(test)]
mod tests;
