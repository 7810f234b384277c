//! Test utilities for API handler testing
//!
//! Handler unit tests call handlers directly with a state from
//! [`TestApiStateBuilder`]. HTTP contract tests drive the full router instead;
//! see `tests/products_api/support.rs`.
//!
//! ```ignore
//! use crate::api::test_utils::create_test_state;
//! let state = create_test_state().await;
//! let response = list_products_handler(State(state)).await;
//! ```

use std::sync::Arc;

use crate::api::routes::ApiState;
use crate::config::DatabaseConfig;
use crate::domain::Product;
use crate::storage::{
    create_pool, CreateProductRequest, DbPool, ProductRepository, SqlxProductRepository,
};

/// Builder for creating test API state with configurable dependencies
#[derive(Default)]
pub struct TestApiStateBuilder {
    pool: Option<DbPool>,
    seed: Vec<CreateProductRequest>,
}

impl TestApiStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing pool instead of a fresh in-memory database
    pub fn with_pool(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Insert a product before the state is handed out
    pub fn with_product(mut self, name: &str, price: f64) -> Self {
        self.seed.push(CreateProductRequest {
            name: name.to_string(),
            price,
            availability: None,
        });
        self
    }

    pub async fn build(self) -> ApiState {
        let pool = match self.pool {
            Some(pool) => pool,
            None => create_test_pool().await,
        };

        let repository = SqlxProductRepository::new(pool);
        for request in self.seed {
            repository.create_product(request).await.expect("seed product");
        }

        ApiState { products: Arc::new(repository) }
    }
}

/// Fresh in-memory database with migrations applied
pub async fn create_test_pool() -> DbPool {
    let config = DatabaseConfig { url: "sqlite::memory:".to_string(), ..Default::default() };
    create_pool(&config).await.expect("create in-memory pool")
}

/// Empty state over a fresh in-memory database
pub async fn create_test_state() -> ApiState {
    TestApiStateBuilder::new().build().await
}

/// First product currently in the store
pub async fn first_product(state: &ApiState) -> Product {
    state
        .products
        .list_products()
        .await
        .expect("list products")
        .pop()
        .expect("store holds at least one product")
}
