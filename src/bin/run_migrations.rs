//! Manual migration runner
//!
//! Opens the SQLite database and applies all pending migrations.
//! Usage: cargo run --bin run_migrations
//!
//! Set DATABASE_URL to specify the target database.
//! Defaults to sqlite://./data/products.db

use product_api::{
    config::DatabaseConfig,
    storage::{create_pool, list_applied_migrations, run_migrations},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let _ = dotenvy::dotenv();

    let db_config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DatabaseConfig::default().url),
        auto_migrate: false, // We'll do it manually below
        ..Default::default()
    };

    let pool = create_pool(&db_config).await?;
    info!("Connected to database");

    run_migrations(&pool).await?;

    for migration in list_applied_migrations(&pool).await? {
        info!(
            version = migration.version,
            description = %migration.description,
            installed_on = %migration.installed_on,
            success = migration.success,
            "Applied migration"
        );
    }

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    info!(products = count, "Migration completed successfully");

    Ok(())
}
