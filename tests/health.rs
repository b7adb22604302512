mod common;

use axum::http::StatusCode;
use storefront_api::routes::{create_app, health::health_check};
use tower::ServiceExt;

use common::{body_json, empty_request, mock_state};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn health_route_is_served_by_the_app() {
    let app = create_app(mock_state());
    let response = app
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn unknown_path_gets_enveloped_404() {
    let app = create_app(mock_state());
    let response = app
        .oneshot(empty_request("GET", "/api/nope", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/api/nope");
}

#[tokio::test]
async fn config_endpoints_expose_configured_values() {
    let app = create_app(mock_state());
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/config/contact-phone", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["value"], "+15550001111");

    let response = app
        .oneshot(empty_request("GET", "/api/config/image-service", None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["data"]["value"], "http://images.test");
}
