use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::error::{ErrorBody, ValidationErrorBody};
use crate::api::handlers::products::{
    CreateProductBody, MessageResponse, ProductListResponse, ProductResponse, UpdateProductBody,
};
use crate::domain::Product;
use crate::validation::{FieldError, Location};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::products::list_products_handler,
        crate::api::handlers::products::get_product_handler,
        crate::api::handlers::products::create_product_handler,
        crate::api::handlers::products::update_product_handler,
        crate::api::handlers::products::toggle_availability_handler,
        crate::api::handlers::products::delete_product_handler
    ),
    components(
        schemas(
            Product,
            CreateProductBody,
            UpdateProductBody,
            ProductResponse,
            ProductListResponse,
            MessageResponse,
            FieldError,
            Location,
            ValidationErrorBody,
            ErrorBody
        )
    ),
    tags(
        (name = "products", description = "Product catalogue management")
    ),
    info(
        title = "Product API",
        description = "CRUD operations on products"
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()).into()
}
