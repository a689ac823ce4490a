//! Logging subscriber initialisation.

use std::io;

use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable single-line records
    #[default]
    Compact,

    /// Newline delimited JSON records
    Json,
}

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when it is set and valid.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] if a subscriber is already installed.
pub fn init(level: &str, format: LogFormat) -> Result<(), LoggingError> {
    match format {
        LogFormat::Compact => init_with_layer(
            level,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            level,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

/// Build the level filter, preferring `RUST_LOG`.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn init_with_layer<L>(level: &str, fmt_layer: L) -> Result<(), LoggingError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(level))
        .try_init()?;

    Ok(())
}
