use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
///
/// `log` records emitted by the library crates are forwarded through the
/// subscriber's `tracing-log` bridge.
pub fn init_logger() {
    if let Err(err) = try_init_logger() {
        tracing::warn!("logger already initialised: {err}");
    }
}

/// Like [`init_logger`], but reports a second initialisation instead of ignoring it.
pub fn try_init_logger() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .with(filter)
        .try_init()
}
