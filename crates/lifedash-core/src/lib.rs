//! Shared foundation for LifeDash: configuration, the error hierarchy,
//! HTTP helpers, number formatting and logging setup.

pub mod config;
pub mod error;
pub mod format;
pub mod http;

pub use config::{
    Config, CurrencyConfig, EndpointsConfig, HttpConfig, LocationConfig, PanelsConfig,
    SpeedConfig, ValidationResult, MAX_STEP_DELAY_SCALE,
};
pub use error::{
    AppError, ConfigError, FetchError, LocationError, ReqwestErrorExt, RusqliteErrorExt,
    StorageError,
};

use anyhow::Result;

/// Initialize tracing. Logs go to stderr so rendered output on stdout stays
/// clean; `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("LifeDash core initialized");
    Ok(())
}
