//! Shared fixtures for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use crm_api::{AppState, config::ApiConfig};
use crm_core::auth::password::hash_password;
use crm_core::store::MemoryStore;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse";

pub fn config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        pg_connection_url: "postgres://unused".into(),
        jwt_secret: "test-secret".into(),
        jwt_refresh_secret: "test-refresh-secret".into(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 86_400,
    }
}

/// Roles, grants and three users: `sales`, `admin`, `desk`.
pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for code in ["R_SUPER", "R_ADMIN", "R_SALES", "R_FRONT_DESK", "R_INFO"] {
        store.add_role(code, true);
    }
    store.grant("R_SALES", "ClueLeads_add");
    store.grant("R_SALES", "Customer_view");
    store.grant("R_FRONT_DESK", "Customer_view");
    store.grant("R_ADMIN", "Employee_delete");

    let hash = hash_password(PASSWORD).expect("hash password");
    store.add_user("sales", Some(hash.clone()), &["R_SALES", "R_GHOST"]);
    store.add_user("admin", Some(hash.clone()), &["R_ADMIN"]);
    store.add_user("desk", Some(hash), &["R_FRONT_DESK", "R_SALES"]);
    store
}

pub fn state_with<S>(store: S) -> AppState
where
    S: crm_core::store::UserStore + crm_core::store::RoleStore + 'static,
{
    AppState::new(config(), Arc::new(store)).expect("app state")
}

pub fn app(state: AppState) -> Router {
    crm_api::router(state)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send a request and return the status plus the decoded JSON envelope.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, json)
}

/// Log in and return `(token, refreshToken)`.
pub async fn login(app: &Router, user_name: &str) -> (String, String) {
    let (status, json) = send(
        app,
        post_json(
            "/api/auth/login",
            serde_json::json!({"userName": user_name, "password": PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    (
        json["data"]["token"].as_str().expect("token").to_string(),
        json["data"]["refreshToken"]
            .as_str()
            .expect("refreshToken")
            .to_string(),
    )
}

pub fn strings(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .expect("array")
        .iter()
        .map(|v| v.as_str().expect("string").to_string())
        .collect()
}
