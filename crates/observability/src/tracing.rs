//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ObservabilityConfig};

/// Initialize tracing/logging for the process from the environment.
///
/// Falls back to defaults when the environment is misconfigured. Safe to call
/// multiple times (subsequent calls are no-ops).
pub fn init() {
    match ObservabilityConfig::from_env() {
        Ok(config) => init_with(&config),
        Err(err) => {
            init_with(&ObservabilityConfig::default());
            ::tracing::warn!(error = %err, "invalid observability config; using defaults");
        }
    }
}

/// Initialize tracing/logging with an explicit configuration.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    // `try_init` fails once a global subscriber exists; that is the no-op case.
    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
