use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::support::{create_product, error_messages, read_json, send_request, setup_test_app};

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::PATCH, "/api/products/not-valid-url", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["ID no valido"]);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::PATCH, "/api/products/2000", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = read_json(response).await;
    assert_eq!(body, json!({"error": "Producto no encontrado"}));
}

#[tokio::test]
async fn consecutive_patches_flip_availability() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;
    let path = format!("/api/products/{}", product.id);

    let first = send_request(&app, Method::PATCH, &path, None).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first: Value = read_json(first).await;
    assert!(first.get("errors").is_none());

    let second = send_request(&app, Method::PATCH, &path, None).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second: Value = read_json(second).await;

    assert_eq!(first["data"]["availability"], false);
    assert_eq!(second["data"]["availability"], true);
    assert_eq!(second["data"]["name"], "Monitor");
}
