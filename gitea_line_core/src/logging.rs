//! Tracing subscriber setup for the CLI and embedding hosts.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "GITEA_LINE_LOG";

/// Install a compact stderr subscriber.
///
/// The filter comes from [`LOG_ENV`] when set, otherwise `debug` for verbose
/// runs and `warn` for the rest.
///
/// # Errors
///
/// Fails when the filter does not parse or a global subscriber is already set.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter_layer = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_thread_names(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
