//! Logging setup for the ElderScape chat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling crate and the binary. `RUST_LOG` overrides it.
///
/// # Arguments
///
/// * `crate_name` - Name of the library crate that owns the binary (e.g., "elderscape-server")
/// * `binary_name` - The name of the binary (e.g., "elderscape-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use elderscape_shared::logger::setup_logger;
///
/// setup_logger("elderscape-server", "elderscape-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directive used when `RUST_LOG` is unset.
///
/// Crate and binary names are normalized to their module form (`-` becomes `_`),
/// and HTTP request tracing from `tower_http` is included at the same level.
pub fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={level},{}={level},tower_http={level}",
        crate_name.replace('-', "_"),
        binary_name.replace('-', "_"),
        level = default_log_level
    )
}
