//! Log output for binaries and test harnesses embedding dsync
//!
//! The library only emits `tracing` events: `debug` per diffed directory
//! and applied op, `trace` for skipped paths and vanished source files,
//! `info` for the summary of a sync call. Nothing is printed until a
//! subscriber is installed, which [`init`] does.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber writing compact lines to stdout.
///
/// Verbosity comes from `RUST_LOG` (for example `dsync=debug`), falling
/// back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init()?;

    Ok(())
}
