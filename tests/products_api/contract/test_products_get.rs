use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::support::{create_product, error_messages, read_json, send_request, setup_test_app};

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/products/not-valid-url", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["Id no valido"]);
}

#[tokio::test]
async fn id_error_reports_param_location() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/products/1.5", None).await;

    let body: Value = read_json(response).await;
    assert_eq!(
        body["errors"][0],
        json!({
            "type": "field",
            "value": "1.5",
            "msg": "Id no valido",
            "path": "id",
            "location": "params"
        })
    );
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/products/2000", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = read_json(response).await;
    assert_eq!(body, json!({"error": "Producto no encontrado"}));
}

#[tokio::test]
async fn existing_product_is_returned() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;

    let response =
        send_request(&app, Method::GET, &format!("/api/products/{}", product.id), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["data"]["id"], json!(product.id.get()));
    assert_eq!(body["data"]["name"], "Monitor");
    assert!(body["data"].get("createdAt").is_some());
}
