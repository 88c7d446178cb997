//! Tracing subscriber setup
//!
//! Logs go to stderr so that stdout stays clean for `--json` output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install the global subscriber.
///
/// `verbose` forces debug level; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
pub fn init(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))
    }
    .map_err(|e| CliError::Logging { message: e.to_string() })?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging { message: e.to_string() })?;

    tracing::debug!("Verbose mode enabled");
    Ok(())
}
