use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::support::{read_json, send_request, setup_test_app};

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let document: Value = read_json(response).await;
    assert!(document["openapi"].as_str().unwrap().starts_with("3."));
    assert!(document["paths"]["/api/products"].is_object());
    assert!(document["paths"]["/api/products/{id}"]["patch"].is_object());
}

#[tokio::test]
async fn swagger_ui_is_mounted() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/docs/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
}
