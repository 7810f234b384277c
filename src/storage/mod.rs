//! # Storage and Persistence
//!
//! Database connectivity and the product repository. The pool is opened once
//! at process start and handed to the API layer explicitly; it is never
//! closed before exit.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use crate::config::DatabaseConfig;

pub use migrations::{
    get_migration_version, list_applied_migrations, run_migrations, validate_migrations,
    MigrationInfo,
};
pub use pool::{connect_store, create_pool, DbPool, STORE_CONNECTION_FAILED};
pub use repositories::{
    CreateProductRequest, ProductRepository, SqlxProductRepository, UpdateProductRequest,
};

use crate::errors::{Error, Result};

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::database(e, "Database connectivity check failed"))?;

    Ok(())
}
