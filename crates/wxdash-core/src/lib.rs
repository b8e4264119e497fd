pub mod config;
pub mod error;

pub use config::{Config, GlyphStyle, LocationConfig, LoggingConfig, UiConfig, WeatherConfig};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins over `default_level`. Output goes to stderr so the
/// dashboard on stdout stays clean.
pub fn init(default_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // A subscriber may already be installed (tests, embedding); that is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("wxdash core initialized");
    Ok(())
}
