//! # Configuration Management
//!
//! Application configuration is read from environment variables (optionally
//! seeded from a `.env` file by the binary) and checked with `validator`.

pub mod settings;

pub use settings::{ApiServerConfig, DatabaseConfig, LogFormat, ObservabilityConfig};

use crate::errors::{Error, Result};
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to the defaults of each settings struct.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = parse_or(&lookup, "PORT", defaults.api.port)?;
        let bind_address =
            lookup("API_BIND_ADDRESS").unwrap_or_else(|| defaults.api.bind_address.clone());
        let allowed_origin = lookup("FRONTEND_URL").filter(|origin| !origin.trim().is_empty());
        let max_body_size = parse_or(&lookup, "API_MAX_BODY_SIZE", defaults.api.max_body_size)?;

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or_else(|| defaults.database.url.clone()),
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database.max_connections,
            )?,
            min_connections: parse_or(
                &lookup,
                "DATABASE_MIN_CONNECTIONS",
                defaults.database.min_connections,
            )?,
            connect_timeout_seconds: parse_or(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT",
                defaults.database.connect_timeout_seconds,
            )?,
            idle_timeout_seconds: parse_or(
                &lookup,
                "DATABASE_IDLE_TIMEOUT",
                defaults.database.idle_timeout_seconds,
            )?,
            auto_migrate: parse_or(&lookup, "DATABASE_AUTO_MIGRATE", defaults.database.auto_migrate)?,
        };

        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| defaults.observability.log_level.clone());
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(Error::config)?,
            None => LogFormat::default(),
        };

        let observability = ObservabilityConfig {
            service_name: lookup("SERVICE_NAME")
                .unwrap_or_else(|| defaults.observability.service_name.clone()),
            log_level,
            log_format,
            enable_metrics: parse_or(
                &lookup,
                "ENABLE_METRICS",
                defaults.observability.enable_metrics,
            )?,
            metrics_port: parse_or(&lookup, "METRICS_PORT", defaults.observability.metrics_port)?,
        };

        let config = Self {
            api: ApiServerConfig { bind_address, port, allowed_origin, max_body_size },
            database,
            observability,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section of the configuration
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.database.validate()?;
        self.observability.validate()?;

        if !self.database.url.starts_with("sqlite:") {
            return Err(Error::validation("Database URL must start with 'sqlite:'"));
        }

        if self.observability.enable_metrics && self.observability.metrics_port == self.api.port {
            return Err(Error::validation("API and metrics ports cannot be the same"));
        }

        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}
