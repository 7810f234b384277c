//! Product repository
//!
//! CRUD access to the `products` table. Mutating calls return `None` when no
//! row matches the id so handlers can answer 404 without a second query.

use crate::domain::{Product, ProductId};
use crate::errors::{Error, Result};
use crate::storage::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

// Database row structure

#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = Error;

    fn try_from(row: ProductRow) -> Result<Self> {
        let product = Product {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            availability: row.availability,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        if !product.is_valid() {
            return Err(Error::internal(format!(
                "Stored product {} violates product invariants",
                product.id
            )));
        }

        Ok(product)
    }
}

/// Request to insert a new product
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    /// Defaults to `true` when absent
    pub availability: Option<bool>,
}

/// Full replacement of a product's mutable fields
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

// Repository trait

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its assigned id
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product>;

    /// List every product, newest first
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Get a product by ID
    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Overwrite name, price and availability
    async fn update_product(
        &self,
        id: ProductId,
        update: UpdateProductRequest,
    ) -> Result<Option<Product>>;

    /// Flip the availability flag
    async fn toggle_availability(&self, id: ProductId) -> Result<Option<Product>>;

    /// Remove a product; `false` when it did not exist
    async fn delete_product(&self, id: ProductId) -> Result<bool>;
}

// SQLx implementation

#[derive(Debug, Clone)]
pub struct SqlxProductRepository {
    pool: DbPool,
}

impl SqlxProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ProductRepository for SqlxProductRepository {
    #[instrument(skip(self, request), fields(product_name = %request.name), name = "db_create_product")]
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product> {
        let now = Utc::now();
        let availability = request.availability.unwrap_or(true);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, price, availability, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(request.price)
        .bind(availability)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, product_name = %request.name, "Failed to create product");
            Error::database(e, format!("Failed to create product '{}'", request.name))
        })?;

        let product = Product::try_from(row)?;
        tracing::info!(product_id = %product.id, product_name = %product.name, "Created product");
        Ok(product)
    }

    #[instrument(skip(self), name = "db_list_products")]
    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list products");
            Error::database(e, "Failed to list products")
        })?;

        rows.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), name = "db_get_product")]
    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, product_id = %id, "Failed to fetch product");
            Error::database(e, format!("Failed to fetch product '{}'", id))
        })?;

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self, update), fields(product_id = %id), name = "db_update_product")]
    async fn update_product(
        &self,
        id: ProductId,
        update: UpdateProductRequest,
    ) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET name = $1, price = $2, availability = $3, updated_at = $4 \
             WHERE id = $5 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&update.name)
        .bind(update.price)
        .bind(update.availability)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, product_id = %id, "Failed to update product");
            Error::database(e, format!("Failed to update product '{}'", id))
        })?;

        if row.is_some() {
            tracing::info!(product_id = %id, "Updated product");
        }

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self), fields(product_id = %id), name = "db_toggle_product_availability")]
    async fn toggle_availability(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET availability = NOT availability, updated_at = $1 \
             WHERE id = $2 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, product_id = %id, "Failed to toggle product availability");
            Error::database(e, format!("Failed to update availability of product '{}'", id))
        })?;

        if let Some(row) = &row {
            tracing::info!(
                product_id = %id,
                availability = row.availability,
                "Toggled product availability"
            );
        }

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self), fields(product_id = %id), name = "db_delete_product")]
    async fn delete_product(&self, id: ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, product_id = %id, "Failed to delete product");
                Error::database(e, format!("Failed to delete product '{}'", id))
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(product_id = %id, "Deleted product");
        }

        Ok(deleted)
    }
}
