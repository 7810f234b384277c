//! # Database Connection Pool Management
//!
//! Provides database connection pool creation and management utilities.

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::{str::FromStr, time::Duration};

/// Type alias for the database connection pool
pub type DbPool = Pool<Sqlite>;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Message logged when the store cannot be reached at startup
pub const STORE_CONNECTION_FAILED: &str = "Hubo un error al conectar la base de datos";

/// Create a database connection pool, connecting eagerly.
///
/// Runs migrations when `auto_migrate` is enabled.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let (pool_options, connect_options) = build_options(config)?;

    let pool = pool_options.connect_with(connect_options).await.map_err(|e| {
        tracing::error!(
            error = %e,
            url = %sanitize_url(&config.url),
            busy_timeout_ms = SQLITE_BUSY_TIMEOUT.as_millis(),
            "Failed to create SQLite database pool"
        );
        Error::database(e, format!("Failed to connect to database: {}", sanitize_url(&config.url)))
    })?;

    log_pool_created(config);

    if config.auto_migrate {
        tracing::info!("Auto-migration enabled, running database migrations");
        crate::storage::migrations::run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Open the store for the lifetime of the process.
///
/// The pool connects lazily, so an unreachable database does not abort
/// startup: the failure is logged and every later store call reports its own
/// error. Only an invalid configuration is returned as `Err`.
pub async fn connect_store(config: &DatabaseConfig) -> Result<DbPool> {
    let (pool_options, connect_options) = build_options(config)?;
    let pool = pool_options.connect_lazy_with(connect_options);

    let ready = async {
        crate::storage::check_connection(&pool).await?;
        if config.auto_migrate {
            crate::storage::migrations::run_migrations(&pool).await?;
        }
        Ok::<_, Error>(())
    }
    .await;

    match ready {
        Ok(()) => log_pool_created(config),
        Err(e) => {
            tracing::error!(
                error = %e,
                url = %sanitize_url(&config.url),
                "{}",
                STORE_CONNECTION_FAILED
            );
        }
    }

    Ok(pool)
}

fn build_options(config: &DatabaseConfig) -> Result<(SqlitePoolOptions, SqliteConnectOptions)> {
    validate_config(config)?;

    let in_memory = config.is_in_memory();

    // Every connection to `:memory:` opens a fresh database, so keep exactly one alive.
    let base_options = SqlitePoolOptions::new()
        .acquire_timeout(config.connect_timeout())
        .test_before_acquire(true);

    let pool_options = if in_memory {
        base_options.max_connections(1).min_connections(1).idle_timeout(None).max_lifetime(None)
    } else {
        base_options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(config.idle_timeout())
    };

    let mut connect_options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            Error::database(
                e,
                format!("Invalid SQLite connection string: {}", sanitize_url(&config.url)),
            )
        })?
        .create_if_missing(true)
        .busy_timeout(SQLITE_BUSY_TIMEOUT)
        .foreign_keys(true);

    if !in_memory {
        connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        if let Err(e) = ensure_parent_dir(&connect_options) {
            tracing::warn!(error = %e, "Could not create database directory");
        }
    }

    Ok((pool_options, connect_options))
}

fn ensure_parent_dir(options: &SqliteConnectOptions) -> Result<()> {
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn log_pool_created(config: &DatabaseConfig) {
    tracing::info!(
        database_type = "sqlite",
        in_memory = config.is_in_memory(),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_ms = config.connect_timeout().as_millis(),
        idle_timeout_ms = config.idle_timeout().map(|d| d.as_millis()),
        "Database connection pool created"
    );
}

/// Validate database configuration
fn validate_config(config: &DatabaseConfig) -> Result<()> {
    if config.max_connections == 0 {
        return Err(Error::validation("max_connections must be greater than 0"));
    }

    if config.min_connections > config.max_connections {
        return Err(Error::validation("min_connections cannot be greater than max_connections"));
    }

    if config.url.is_empty() {
        return Err(Error::validation("database URL cannot be empty"));
    }

    if !config.url.starts_with("sqlite:") {
        return Err(Error::validation("database URL must start with 'sqlite:'"));
    }

    Ok(())
}

/// Sanitize database URL for logging (remove credentials)
pub fn sanitize_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) if parsed.password().is_some() || !parsed.username().is_empty() => format!(
            "{}://***:***@{}{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or("unknown"),
            parsed.path()
        ),
        _ => url.to_string(),
    }
}
