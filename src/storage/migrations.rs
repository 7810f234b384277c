//! # Database Migration Management
//!
//! Schema evolution uses SQL migrations embedded in the binary from
//! `migrations/`. They run on startup when `auto_migrate` is enabled, which
//! creates the `products` table on first boot.

use crate::errors::{Error, Result};
use crate::storage::DbPool;
use serde::{Deserialize, Serialize};
use sqlx::migrate::Migrator;
use sqlx::Row;
use tracing::{info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Migration information structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationInfo {
    pub version: i64,
    pub description: String,
    pub installed_on: chrono::DateTime<chrono::Utc>,
    pub execution_time: i64,
    pub success: bool,
}

/// Run all pending database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    info!(available = MIGRATOR.iter().count(), "Starting database migration process");

    MIGRATOR.run(pool).await.map_err(|e| {
        tracing::error!(error = %e, "Database migration failed");
        Error::Migration { source: e, context: "Failed to apply embedded migrations".to_string() }
    })?;

    info!(version = ?latest_embedded_version(), "Database migrations completed");
    Ok(())
}

fn latest_embedded_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}

/// Validate that every embedded migration has been applied and nothing else has
pub async fn validate_migrations(pool: &DbPool) -> Result<bool> {
    info!("Validating migration integrity");

    let applied: Vec<i64> =
        list_applied_migrations(pool).await?.into_iter().map(|m| m.version).collect();
    let expected: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();

    for version in &expected {
        if !applied.contains(version) {
            warn!(version = version, "Missing migration");
            return Ok(false);
        }
    }

    for version in &applied {
        if !expected.contains(version) {
            warn!(version = version, "Unexpected migration found");
            return Ok(false);
        }
    }

    info!("Migration validation successful");
    Ok(true)
}

/// Get the current migration version (highest applied)
pub async fn get_migration_version(pool: &DbPool) -> Result<i64> {
    let applied = list_applied_migrations(pool).await?;
    Ok(applied.into_iter().map(|m| m.version).max().unwrap_or(0))
}

/// List all applied migrations
pub async fn list_applied_migrations(pool: &DbPool) -> Result<Vec<MigrationInfo>> {
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| Error::database(e, "Failed to inspect migration table"))?;

    if table_exists == 0 {
        return Ok(Vec::new());
    }

    let rows = sqlx::query(
        "SELECT version, description, installed_on, execution_time, success \
         FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| Error::database(e, "Failed to list applied migrations"))?;

    Ok(rows
        .into_iter()
        .map(|row| MigrationInfo {
            version: row.get("version"),
            description: row.get("description"),
            installed_on: row.get("installed_on"),
            execution_time: row.get("execution_time"),
            success: row.get("success"),
        })
        .collect())
}
