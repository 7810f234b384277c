use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use product_api::{
    api::{build_router, ApiState},
    config::{ApiServerConfig, DatabaseConfig},
    domain::Product,
    storage::{create_pool, DbPool, SqlxProductRepository},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const FRONTEND_URL: &str = "http://localhost:5173";

pub struct TestApp {
    state: ApiState,
    pub pool: DbPool,
    pub config: ApiServerConfig,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_origin(Some(FRONTEND_URL)).await
}

pub async fn setup_test_app_with_origin(origin: Option<&str>) -> TestApp {
    let database = DatabaseConfig { url: "sqlite::memory:".to_string(), ..Default::default() };
    // Runs the same embedded migrations as production
    let pool = create_pool(&database).await.expect("create sqlite pool");

    let state = ApiState { products: Arc::new(SqlxProductRepository::new(pool.clone())) };
    let config =
        ApiServerConfig { allowed_origin: origin.map(str::to_string), ..Default::default() };

    TestApp { state, pool, config }
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(path);

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    send(app, request).await
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router().oneshot(request).await.expect("request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

/// Messages of a 400 validation response, in order
pub async fn error_messages(response: Response) -> Vec<String> {
    let body: Value = read_json(response).await;
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["msg"].as_str().expect("msg").to_string())
        .collect()
}

pub async fn create_product(app: &TestApp, name: &str, price: f64) -> Product {
    use axum::http::StatusCode;

    let response =
        send_request(app, Method::POST, "/api/products", Some(json!({"name": name, "price": price})))
            .await;
    assert_eq!(response.status(), StatusCode::CREATED, "failed to create product {}", name);

    let body: Value = read_json(response).await;
    serde_json::from_value(body["data"].clone()).expect("product in data")
}
