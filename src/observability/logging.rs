//! # Structured Logging
//!
//! Subscriber setup plus span helper macros. Output is human readable text by
//! default; `LOG_FORMAT=json` switches to one JSON object per line with the
//! current span attached.

use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat, ObservabilityConfig};
use crate::errors::{Error, Result};

/// Create a tracing span for request tracking.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/api/products");
/// let span = request_span!("PUT", "/api/products/1", product_id = 1);
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// Fails when the filter directive is unusable or a subscriber is already set.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| {
        Error::config(format!("Invalid log filter '{}': {}", config.log_level, e))
    })?;

    let installed = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    installed.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}

/// Log configuration at startup
pub fn log_config_info(config: &Config) {
    tracing::info!(
        server_address = %config.api.socket_address(),
        allowed_origin = config.api.allowed_origin.as_deref().unwrap_or("<none>"),
        database_url = %crate::storage::pool::sanitize_url(&config.database.url),
        auto_migrate = config.database.auto_migrate,
        log_format = ?config.observability.log_format,
        metrics_enabled = config.observability.enable_metrics,
        "Product API configuration"
    );
}
