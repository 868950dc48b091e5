//! Tracing subscriber initialization.

use courtside_domain::{CourtsideError, LogConfig, LogFormat, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching config files.
pub fn init_telemetry(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|err| CourtsideError::Config(format!("invalid log filter: {err}")))?;

    let result = match config.format {
        LogFormat::Json => {
            tracing_subscriber::fmt().with_env_filter(filter).json().try_init()
        }
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    result.map_err(|err| CourtsideError::Config(format!("tracing init failed: {err}")))
}
