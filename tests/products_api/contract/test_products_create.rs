use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};

use crate::support::{error_messages, read_json, send, send_request, setup_test_app};

#[tokio::test]
async fn empty_body_reports_every_failed_rule() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::POST, "/api/products", Some(json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_messages(response).await,
        vec![
            "El nombre del producto no puede ir vacio",
            "Valor no valido",
            "El precio del producto no puede ir vacio",
            "Precio no valido",
        ]
    );
}

#[tokio::test]
async fn missing_body_behaves_like_empty_object() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::POST, "/api/products", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await.len(), 4);
}

#[tokio::test]
async fn zero_price_reports_only_positivity() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Xbox", "price": 0})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["Precio no valido"]);
}

#[tokio::test]
async fn text_price_reports_two_errors() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Xbox", "price": "Hola"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0],
        json!({
            "type": "field",
            "value": "Hola",
            "msg": "Valor no valido",
            "path": "price",
            "location": "body"
        })
    );
}

#[tokio::test]
async fn missing_field_error_omits_value() {
    let app = setup_test_app().await;

    let response =
        send_request(&app, Method::POST, "/api/products", Some(json!({"price": 10}))).await;

    let body: Value = read_json(response).await;
    let error = &body["errors"][0];
    assert_eq!(error["path"], "name");
    assert!(error.get("value").is_none());
}

#[tokio::test]
async fn valid_product_is_created() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Mouse - Testing", "price": 300})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = read_json(response).await;
    assert!(body.get("errors").is_none());
    assert_eq!(body["data"]["name"], "Mouse - Testing");
    assert_eq!(body["data"]["price"], json!(300.0));
    assert_eq!(body["data"]["availability"], true);
    assert!(body["data"]["id"].is_i64());
}

#[tokio::test]
async fn numeric_string_price_is_accepted() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Teclado", "price": "49.90"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = read_json(response).await;
    assert_eq!(body["data"]["price"], json!(49.9));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = setup_test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Mouse\", "))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body, json!({"error": "JSON no valido"}));
}

#[tokio::test]
async fn overflowing_price_string_is_rejected_with_envelope() {
    let app = setup_test_app().await;
    let price = format!("1{}", "0".repeat(400));

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Xbox", "price": price})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["Precio no valido"]);
}

#[tokio::test]
async fn hex_price_reports_only_numeric_error() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": "Xbox", "price": "0x10"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(response).await, vec!["Valor no valido"]);
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = setup_test_app().await;
    let name = "x".repeat(app.config.max_body_size + 1);

    let response = send_request(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({"name": name, "price": 300})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = read_json(response).await;
    assert_eq!(body, json!({"error": "Cuerpo de la peticion demasiado grande"}));
}
