#![allow(dead_code)]

use axum::{
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use storefront_api::{
    config::AppConfig, services::auth_service, state::AppState,
};

pub const JWT_SECRET: &str = "integration-secret-with-enough-length";

pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_days: 7,
        admin_username: None,
        admin_password: None,
        image_service_url: "http://images.test".into(),
        contact_phone: "+15550001111".into(),
    }
}

/// State backed by an empty mock connection; any query it receives fails.
pub fn mock_state() -> AppState {
    mock_state_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn mock_state_with(orm: DatabaseConnection) -> AppState {
    AppState::new(orm, test_config("postgres://mock"))
}

pub fn admin_token() -> String {
    auth_service::issue_token("admin", JWT_SECRET, chrono::Duration::days(1))
        .expect("token")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
