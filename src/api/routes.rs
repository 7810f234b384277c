use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::ApiServerConfig;
use crate::observability::trace_http_requests;
use crate::storage::ProductRepository;
use crate::validation::{
    products::{create_product_rules, get_product_rules, product_id_rules, update_product_rules},
    RuleSet,
};

use super::{
    docs,
    handlers::{
        create_product_handler, delete_product_handler, get_product_handler,
        list_products_handler, toggle_availability_handler, update_product_handler,
    },
    middleware::{enforce_origin, validate_request, OriginState, ValidationState},
};

#[derive(Clone)]
pub struct ApiState {
    pub products: Arc<dyn ProductRepository>,
}

pub fn build_router(state: ApiState, config: &ApiServerConfig) -> Router {
    let max_body_size = config.max_body_size;
    let validation_layer = |rules: RuleSet| {
        middleware::from_fn_with_state(ValidationState::new(rules, max_body_size), validate_request)
    };

    let products_api = Router::new()
        .merge(Router::new().route("/api/products", get(list_products_handler)))
        .merge(
            Router::new()
                .route("/api/products", post(create_product_handler))
                .route_layer(validation_layer(create_product_rules())),
        )
        .merge(
            Router::new()
                .route("/api/products/{id}", get(get_product_handler))
                .route_layer(validation_layer(get_product_rules())),
        )
        .merge(
            Router::new()
                .route("/api/products/{id}", put(update_product_handler))
                .route_layer(validation_layer(update_product_rules())),
        )
        .merge(
            Router::new()
                .route("/api/products/{id}", patch(toggle_availability_handler))
                .route_layer(validation_layer(product_id_rules())),
        )
        .merge(
            Router::new()
                .route("/api/products/{id}", delete(delete_product_handler))
                .route_layer(validation_layer(product_id_rules())),
        )
        .with_state(state);

    let allowed_origin = parse_origin(config.allowed_origin.as_deref());
    let origin_state: OriginState = Arc::new(allowed_origin.clone());

    products_api
        .merge(docs::docs_router())
        .layer(cors_layer(allowed_origin))
        .layer(middleware::from_fn_with_state(origin_state, enforce_origin))
        .layer(middleware::from_fn(trace_http_requests))
}

fn parse_origin(origin: Option<&str>) -> Option<HeaderValue> {
    let origin = origin?.trim().trim_end_matches('/');
    match HeaderValue::from_str(origin) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(origin = %origin, error = %e, "ignoring unusable allowed origin");
            None
        }
    }
}

fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    match allowed_origin {
        Some(origin) => layer.allow_origin(AllowOrigin::exact(origin)),
        None => layer,
    }
}
