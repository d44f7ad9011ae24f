//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where documents and identities are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL at the given connection URL.
    Postgres { database_url: String },
    /// Process memory; everything is lost on restart.
    Memory,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub store: StoreBackend,
    pub max_connections: u32,
    pub log_level: Level,
    pub cors_origin: String,
    /// Live session contexts unused for this long are dropped.
    pub session_idle_timeout: Duration,
    /// How often idle contexts and expired auth sessions are swept.
    pub session_sweep_interval: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Server ---
        let bind_address = parse_var::<SocketAddr>("BIND_ADDRESS", &var_or("BIND_ADDRESS", "0.0.0.0:3000"))?;
        let cors_origin = var_or("CORS_ORIGIN", "http://localhost:3000");

        // --- Storage ---
        let backend = var_or("STORE_BACKEND", "postgres").to_lowercase();
        let store = match backend.as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue(
                    "STORE_BACKEND".to_string(),
                    format!("'{}' is not one of postgres, memory", other),
                ))
            }
        };
        let max_connections =
            parse_var::<u32>("DATABASE_MAX_CONNECTIONS", &var_or("DATABASE_MAX_CONNECTIONS", "5"))?;

        // --- Sessions ---
        let session_idle_timeout = Duration::from_secs(parse_var::<u64>(
            "SESSION_IDLE_SECS",
            &var_or("SESSION_IDLE_SECS", "1800"),
        )?);
        let session_sweep_interval = Duration::from_secs(parse_var::<u64>(
            "SESSION_SWEEP_SECS",
            &var_or("SESSION_SWEEP_SECS", "60"),
        )?);
        if session_sweep_interval.is_zero() {
            return Err(ConfigError::InvalidValue(
                "SESSION_SWEEP_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        // --- Logging ---
        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            store,
            max_connections,
            log_level,
            cors_origin,
            session_idle_timeout,
            session_sweep_interval,
        })
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "DATABASE_URL"));
    }

    #[test]
    fn defaults_apply_for_memory_backend() {
        let config = load(&[("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.session_idle_timeout, Duration::from_secs(1800));
        assert_eq!(config.session_sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn reads_postgres_settings() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/literature"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/literature".to_string()
            }
        );
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            load(&[("STORE_BACKEND", "firestore")]),
            Err(ConfigError::InvalidValue(ref v, _)) if v == "STORE_BACKEND"
        ));
        assert!(matches!(
            load(&[("STORE_BACKEND", "memory"), ("BIND_ADDRESS", "nowhere")]),
            Err(ConfigError::InvalidValue(ref v, _)) if v == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("STORE_BACKEND", "memory"), ("SESSION_SWEEP_SECS", "0")]),
            Err(ConfigError::InvalidValue(ref v, _)) if v == "SESSION_SWEEP_SECS"
        ));
        assert!(matches!(
            load(&[("STORE_BACKEND", "memory"), ("RUST_LOG", "loud")]),
            Err(ConfigError::InvalidValue(ref v, _)) if v == "RUST_LOG"
        ));
    }
}
