//! Product resource
//!
//! A persisted product always has a non-empty name and a strictly positive
//! price; the store enforces both with table constraints as well.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ProductId;

/// A product as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "name": "Monitor Curvo de 49\"",
    "price": 300.0,
    "availability": true,
    "createdAt": "2024-06-01T12:00:00Z",
    "updatedAt": "2024-06-01T12:00:00Z"
}))]
pub struct Product {
    /// The product ID
    pub id: ProductId,
    /// The product name
    pub name: String,
    /// The product price
    pub price: f64,
    /// Whether the product is available
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the record satisfies the product invariants
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.price > 0.0
    }
}
