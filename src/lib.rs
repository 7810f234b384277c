//! # Product API
//!
//! A REST API exposing CRUD operations on a single `Product` resource backed
//! by SQLite.
//!
//! ## Architecture
//!
//! ```text
//! Router → Validation middleware → Handlers → ProductRepository → SQLite
//!    ↓
//! CORS, HTTP tracing, metrics
//! ```
//!
//! Every route declares an ordered rule set (see [`validation::products`]).
//! All failing rules of a request are reported together as a 400 response;
//! handlers only run once validation passed.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use product_api::{
//!     api::{start_api_server, ApiState},
//!     storage::{connect_store, SqlxProductRepository},
//!     Config, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let pool = connect_store(&config.database).await?;
//!     let state = ApiState { products: Arc::new(SqlxProductRepository::new(pool)) };
//!     start_api_server(config.api, state).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;
pub mod validation;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
