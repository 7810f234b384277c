use std::sync::Arc;

use product_api::{
    api::{start_api_server, ApiState},
    observability::{init_observability, log_config_info},
    storage::{connect_store, SqlxProductRepository},
    Config, Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = Config::from_env()?;
    init_observability(&config.observability).await?;

    info!(app_name = APP_NAME, version = VERSION, "Starting product API");
    log_config_info(&config);

    // A store that cannot be reached is logged and retried lazily per request
    let pool = connect_store(&config.database).await?;
    let state = ApiState { products: Arc::new(SqlxProductRepository::new(pool)) };

    start_api_server(config.api, state).await?;

    info!("Product API stopped");
    Ok(())
}
