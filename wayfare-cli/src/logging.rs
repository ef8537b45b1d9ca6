//! Diagnostic output for the CLI.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Library crates log through the `log` facade; those records are forwarded
/// to the subscriber. Calling this twice keeps the first subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        log::debug!("logging already initialised: {err}");
    }
}
