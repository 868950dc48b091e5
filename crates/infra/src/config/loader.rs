//! Configuration loader
//!
//! Loads application configuration from a TOML file and environment
//! variables, environment winning.
//!
//! ## Loading Strategy
//! 1. Read `.env` if present (development convenience)
//! 2. Load the first config file found among the probed paths
//! 3. Apply `COURTSIDE_*` environment overrides on top
//!
//! ## Environment Variables
//! - `COURTSIDE_HTTP_HOST`: listener host
//! - `COURTSIDE_HTTP_PORT`: listener port
//! - `COURTSIDE_DB_PATH`: SQLite database file path
//! - `COURTSIDE_DB_POOL_SIZE`: connection pool size
//! - `COURTSIDE_LOG_LEVEL`: tracing filter directive
//! - `COURTSIDE_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes, in order: `./config.toml`, `./courtside.toml`,
//! `../config.toml`, `../courtside.toml`.

use std::path::Path;
use std::str::FromStr;

use courtside_domain::{Config, CourtsideError, LogFormat, Result};

const CONFIG_PATHS: [&str; 4] =
    ["config.toml", "courtside.toml", "../config.toml", "../courtside.toml"];

/// Load configuration: file first (falling back to defaults), then
/// environment overrides.
pub fn load() -> Result<Config> {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let mut config = match probe_config_file()? {
        Some((path, config)) => {
            tracing::info!(path = %path, "configuration loaded from file");
            config
        }
        None => {
            tracing::debug!("no config file found, starting from defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a specific TOML file.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        CourtsideError::Config(format!("cannot read {}: {err}", path.display()))
    })?;
    toml::from_str(&raw)
        .map_err(|err| CourtsideError::Config(format!("cannot parse {}: {err}", path.display())))
}

fn probe_config_file() -> Result<Option<(String, Config)>> {
    for candidate in CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.is_file() {
            return load_from_file(path).map(|config| Some((candidate.to_owned(), config)));
        }
    }
    Ok(None)
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(host) = env_var("COURTSIDE_HTTP_HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_var("COURTSIDE_HTTP_PORT") {
        config.server.port = parse_env("COURTSIDE_HTTP_PORT", &port)?;
    }
    if let Some(path) = env_var("COURTSIDE_DB_PATH") {
        config.database.path = path;
    }
    if let Some(size) = env_var("COURTSIDE_DB_POOL_SIZE") {
        config.database.pool_size = parse_env("COURTSIDE_DB_POOL_SIZE", &size)?;
    }
    if let Some(level) = env_var("COURTSIDE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = env_var("COURTSIDE_LOG_FORMAT") {
        config.logging.format = match format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(CourtsideError::Config(format!(
                    "COURTSIDE_LOG_FORMAT must be 'pretty' or 'json', got {other:?}"
                )))
            }
        };
    }
    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|err| CourtsideError::Config(format!("invalid {name} value {raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn file_values_are_applied() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9999\n\n[database]\npath = \"x.db\"\npool_size = 2\n"
        )
        .expect("write config");

        let config = load_from_file(file.path()).expect("load");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.database.path, "x.db");
        assert_eq!(config.database.pool_size, 2);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "not toml at all [").expect("write config");

        let err = load_from_file(file.path()).expect_err("should fail");
        assert!(matches!(err, CourtsideError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load_from_file(Path::new("/does/not/exist.toml")).expect_err("should fail");
        assert!(matches!(err, CourtsideError::Config(_)));
    }

    #[test]
    fn env_override_rejects_bad_port() {
        let err =
            parse_env::<u16>("COURTSIDE_HTTP_PORT", "not-a-port").expect_err("should fail");
        assert!(matches!(err, CourtsideError::Config(_)));
    }
}
