use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::support::{create_product, error_messages, read_json, send_request, setup_test_app};

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::PUT,
        "/api/products/not-valid-url",
        Some(json!({"name": "Monitor Curvo Test", "price": 100, "availability": true})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["ID no valido"]);
}

#[tokio::test]
async fn empty_body_reports_five_errors() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/products/{}", product.id),
        Some(json!({})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let messages = error_messages(response).await;
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[4], "Valor para disponibilidad no valido");
}

#[tokio::test]
async fn zero_price_reports_only_positivity() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/products/{}", product.id),
        Some(json!({"name": "Monitor Curvo", "price": 0, "availability": true})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["Precio no valido"]);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::PUT,
        "/api/products/2000",
        Some(json!({"name": "Monitor Curvo", "price": 300, "availability": true})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "Producto no encontrado");
}

#[tokio::test]
async fn update_round_trips_submitted_fields() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/products/{}", product.id),
        Some(json!({"name": "Monitor Curvo", "price": 300, "availability": false})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["data"]["id"], json!(product.id.get()));
    assert_eq!(body["data"]["name"], "Monitor Curvo");
    assert_eq!(body["data"]["price"], json!(300.0));
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn textual_availability_is_accepted() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/products/{}", product.id),
        Some(json!({"name": "Monitor", "price": "250", "availability": "0"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["data"]["price"], json!(250.0));
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn overflowing_price_string_is_rejected_with_envelope() {
    let app = setup_test_app().await;
    let product = create_product(&app, "Monitor", 300.0).await;
    let price = format!("1{}", "0".repeat(400));

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/products/{}", product.id),
        Some(json!({"name": "Monitor Curvo", "price": price, "availability": true})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["Precio no valido"]);
}
