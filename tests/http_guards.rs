mod common;

use axum::http::StatusCode;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use storefront_api::{
    entity::{admin_users, products},
    routes::create_app,
    services::auth_service,
};
use tower::ServiceExt;
use uuid::Uuid;

use common::{admin_token, body_json, empty_request, json_request, mock_state, mock_state_with};

fn order_payload(items: serde_json::Value) -> serde_json::Value {
    json!({
        "customer_name": "Jane Doe",
        "customer_email": "jane@example.com",
        "contact_number": "+15551234567",
        "country": "US",
        "state_province": "CA",
        "city": "San Francisco",
        "post_code": "94103",
        "items": items,
    })
}

#[tokio::test]
async fn admin_routes_reject_missing_token() {
    let app = create_app(mock_state());
    let response = app
        .oneshot(empty_request("GET", "/api/admin/orders", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Unauthorized");
}

#[tokio::test]
async fn admin_routes_reject_malformed_and_foreign_tokens() {
    let app = create_app(mock_state());
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/admin/orders", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let foreign = auth_service::issue_token(
        "admin",
        "some-other-secret-that-is-long-enough",
        chrono::Duration::days(1),
    )
    .unwrap();
    let response = app
        .oneshot(empty_request("DELETE", &format!("/api/admin/products/{}", Uuid::new_v4()), Some(&foreign)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let expired = auth_service::issue_token(
        "admin",
        common::JWT_SECRET,
        chrono::Duration::days(-1),
    )
    .unwrap();
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/content/home",
            Some(&expired),
            json!({ "hero_title": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_order_status_is_bad_request() {
    let token = admin_token();
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/orders/{}/status", Uuid::new_v4()),
            Some(&token),
            json!({ "status": "Shipped" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_image_list_is_bad_request() {
    let token = admin_token();
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/admin/products/{}/images", Uuid::new_v4()),
            Some(&token),
            json!({ "image_urls": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("No image URLs provided"));
}

#[tokio::test]
async fn checkout_without_items_is_bad_request() {
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request("POST", "/api/orders", None, order_payload(json!([]))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_with_zero_quantity_is_bad_request() {
    let items = json!([{
        "product_id": Uuid::new_v4(),
        "product_name": "Tee",
        "price": "10.00",
        "quantity": 0,
    }]);
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request("POST", "/api/orders", None, order_payload(items)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_enveloped_bad_request() {
    let app = create_app(mock_state());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["data"]["error"].is_string());
}

#[tokio::test]
async fn unknown_content_key_is_not_found() {
    let app = create_app(mock_state());
    let response = app
        .oneshot(empty_request("GET", "/api/content/contact", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<products::Model>::new()])
        .into_connection();
    let app = create_app(mock_state_with(orm));
    let response = app
        .oneshot(empty_request("GET", &format!("/api/products/{}", Uuid::new_v4()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<admin_users::Model>::new()])
        .into_connection();
    let app = create_app(mock_state_with(orm));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "username": "ghost", "password": "whatever" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let admin = admin_users::Model {
        id: Uuid::new_v4(),
        username: "admin".into(),
        password_hash: auth_service::hash_password("admin123").unwrap(),
        created_at: chrono::Utc::now().into(),
    };
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin]])
        .into_connection();
    let app = create_app(mock_state_with(orm));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "username": "admin", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_correct_password_returns_usable_token() {
    let admin = admin_users::Model {
        id: Uuid::new_v4(),
        username: "admin".into(),
        password_hash: auth_service::hash_password("admin123").unwrap(),
        created_at: chrono::Utc::now().into(),
    };
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin]])
        .into_connection();
    let app = create_app(mock_state_with(orm));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "username": "admin", "password": "admin123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "admin");
    let token = body["data"]["token"].as_str().unwrap();
    let claims = auth_service::decode_token(token, common::JWT_SECRET).unwrap();
    assert_eq!(claims.sub, "admin");
}

#[tokio::test]
async fn bad_query_string_is_enveloped_bad_request() {
    let app = create_app(mock_state());
    for uri in ["/api/products?gender=kids", "/api/products?page=abc"] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().starts_with("Bad Request"));
        assert!(body["data"]["error"].is_string());
    }
}

#[tokio::test]
async fn checkout_total_beyond_column_range_is_bad_request() {
    let items = json!([{
        "product_id": Uuid::new_v4(),
        "product_name": "Coat",
        "price": "99999999.99",
        "quantity": 1000000,
    }]);
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request("POST", "/api/orders", None, order_payload(items)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_price_beyond_column_range_is_bad_request() {
    let token = admin_token();
    let app = create_app(mock_state());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/products",
            Some(&token),
            json!({
                "name": "Gold Coat",
                "price": "100000000000.00",
                "gender": "unisex",
                "category": "Coats",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
