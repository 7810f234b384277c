//! Product endpoints
//!
//! Every handler runs behind the route's validation middleware, so path ids
//! are known to be integers and bodies already satisfy the field rules.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    api::{error::ApiError, routes::ApiState},
    domain::{Product, ProductId},
    storage::{CreateProductRequest, UpdateProductRequest},
    validation::coerce,
};

pub const MSG_DELETED: &str = "Producto Eliminado";

/// Body for creating a product
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Monitor Curvo de 49\"", "price": 300}))]
pub struct CreateProductBody {
    #[serde(deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(deserialize_with = "coerce::number")]
    pub price: f64,
}

/// Body for replacing a product
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Monitor Curvo de 49\"", "price": 399, "availability": false}))]
pub struct UpdateProductBody {
    #[serde(deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(deserialize_with = "coerce::number")]
    pub price: f64,
    #[serde(deserialize_with = "coerce::flag")]
    pub availability: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"data": "Producto Eliminado"}))]
pub struct MessageResponse {
    pub data: String,
}

fn record_mutation(operation: &'static str) {
    counter!("products_mutations_total", "operation" => operation).increment(1);
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, newest first", body = ProductListResponse),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorBody)
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn list_products_handler(
    State(state): State<ApiState>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.products.list_products().await?;
    Ok(Json(ProductListResponse { data: products }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 400, description = "Invalid id", body = crate::api::error::ValidationErrorBody),
        (status = 404, description = "No product with that id", body = crate::api::error::ErrorBody)
    ),
    tag = "products"
)]
#[instrument(skip(state), fields(product_id = %id))]
pub async fn get_product_handler(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get_product_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(ProductResponse { data: product }))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation errors", body = crate::api::error::ValidationErrorBody),
        (status = 413, description = "Body exceeds the size limit", body = crate::api::error::ErrorBody)
    ),
    tag = "products"
)]
#[instrument(skip(state, body), fields(product_name = %body.name))]
pub async fn create_product_handler(
    State(state): State<ApiState>,
    Json(body): Json<CreateProductBody>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state
        .products
        .create_product(CreateProductRequest {
            name: body.name,
            price: body.price,
            availability: None,
        })
        .await?;

    record_mutation("create");
    Ok((StatusCode::CREATED, Json(ProductResponse { data: product })))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product replaced", body = ProductResponse),
        (status = 400, description = "Invalid id or validation errors", body = crate::api::error::ValidationErrorBody),
        (status = 413, description = "Body exceeds the size limit", body = crate::api::error::ErrorBody),
        (status = 404, description = "No product with that id", body = crate::api::error::ErrorBody)
    ),
    tag = "products"
)]
#[instrument(skip(state, body), fields(product_id = %id))]
pub async fn update_product_handler(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateProductBody>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .update_product(
            id,
            UpdateProductRequest {
                name: body.name,
                price: body.price,
                availability: body.availability,
            },
        )
        .await?
        .ok_or(ApiError::NotFound)?;

    record_mutation("update");
    Ok(Json(ProductResponse { data: product }))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Availability flipped", body = ProductResponse),
        (status = 400, description = "Invalid id", body = crate::api::error::ValidationErrorBody),
        (status = 404, description = "No product with that id", body = crate::api::error::ErrorBody)
    ),
    tag = "products"
)]
#[instrument(skip(state), fields(product_id = %id))]
pub async fn toggle_availability_handler(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.toggle_availability(id).await?.ok_or(ApiError::NotFound)?;

    record_mutation("toggle_availability");
    Ok(Json(ProductResponse { data: product }))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = crate::api::error::ValidationErrorBody),
        (status = 404, description = "No product with that id", body = crate::api::error::ErrorBody)
    ),
    tag = "products"
)]
#[instrument(skip(state), fields(product_id = %id))]
pub async fn delete_product_handler(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.products.delete_product(id).await? {
        return Err(ApiError::NotFound);
    }

    record_mutation("delete");
    Ok(Json(MessageResponse { data: MSG_DELETED.to_string() }))
}
