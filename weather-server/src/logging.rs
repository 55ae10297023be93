use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, LogFormat};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `log_level`.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.log_level.trim())
            .with_context(|| format!("invalid log_level: {}", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}
