//! Router tests that never reach the database.
//!
//! Requests are rejected during extraction or validation, or the lazy pool
//! fails to connect and the service reports a failure.

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use shopapi_integration_tests::{JPEG, offline_state};
use tower::ServiceExt;

const BOUNDARY: &str = "shopapi-test-boundary";

async fn send(request: Request<Body>) -> Response {
    shopapi_server::app(offline_state())
        .oneshot(request)
        .await
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn multipart(method: Method, fields: &[(&str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        if *name == "image" {
            body.extend_from_slice(
                b"Content-Disposition: form-data; name=\"image\"; filename=\"upload.bin\"\r\n\
                  Content-Type: application/octet-stream\r\n\r\n",
            );
        } else {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
        }
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri("/api/v1/image")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn status_of(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json["status"].as_str().unwrap().to_owned())
}

#[tokio::test]
async fn test_health() {
    let response = send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn test_readiness_without_database() {
    let response = send(get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let response = send(json_request(Method::POST, "/api/v1/client", "{not json")).await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.starts_with("failed extracting request: "), "{message}");
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let body = json!({"uid": "4988150e-1c82-490f-8c07-ee74ace2dd14", "amount": "five"});
    let response = send(json_request(
        Method::PATCH,
        "/api/v1/product",
        &body.to_string(),
    ))
    .await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.starts_with("failed extracting request: "), "{message}");
}

#[tokio::test]
async fn test_blank_name_fails_validation() {
    let body = json!({
        "client_name": " ",
        "client_surname": "Kadyk",
        "birthday": "1994-05-17",
        "registration_date": "2026-01-30",
        "gender": "female",
        "address": {"country": "USA", "city": "Seattle", "street": "Pike St"}
    });
    let response = send(json_request(Method::POST, "/api/v1/client", &body.to_string())).await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "failed validating request: field 'client_name' is required"
    );
}

#[tokio::test]
async fn test_negative_price_fails_validation() {
    let body = json!({
        "name": "Mug",
        "category": "kitchen",
        "price": -1.5,
        "available_stock": 3,
        "supplier_id": "4988150e-1c82-490f-8c07-ee74ace2dd14",
        "image_id": "376de312-5bcb-4320-8ba3-bd2050548229"
    });
    let response = send(json_request(Method::POST, "/api/v1/product", &body.to_string())).await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.contains("'price'"), "{message}");
}

#[tokio::test]
async fn test_bad_query_is_bad_request() {
    let response = send(get("/api/v1/clients?limit=ten")).await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.starts_with("failed extracting request: "), "{message}");

    let response = send(get("/api/v1/supplier?uid=not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_unknown_type() {
    let response = send(multipart(Method::POST, &[("image", &b"GIF89a\x01\x00"[..])])).await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "failed extracting request: file type is not allowed for field 'image'"
    );
}

#[tokio::test]
async fn test_upload_requires_image() {
    let response = send(multipart(
        Method::POST,
        &[("uid", &b"376de312-5bcb-4320-8ba3-bd2050548229"[..])],
    ))
    .await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.ends_with("field 'image' is required"), "{message}");
}

#[tokio::test]
async fn test_update_requires_uid() {
    let response = send(multipart(Method::PATCH, &[("image", JPEG)])).await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.ends_with("field 'uid' is required"), "{message}");
}

#[tokio::test]
async fn test_storage_failure_is_service_error() {
    let response = send(get(
        "/api/v1/supplier?uid=4988150e-1c82-490f-8c07-ee74ace2dd14",
    ))
    .await;
    let (status, message) = status_of(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message, "service failed exec request");
}

#[tokio::test]
async fn test_unknown_route() {
    let response = send(get("/api/v1/warehouse")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
