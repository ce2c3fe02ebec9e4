//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the
//! same middleware stack that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use nexo_api::auth::jwt::{generate_access_token, JwtConfig};
use nexo_api::auth::password::hash_password;
use nexo_api::config::ServerConfig;
use nexo_api::router::build_app_router;
use nexo_api::state::AppState;
use nexo_core::types::DbId;
use nexo_db::models::profile::CreateSignup;
use nexo_db::repositories::{ProfileRepo, SkillRepo};

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request_json(app, "POST", uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request_json(app, "POST", uri, body, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request_json(app, "PUT", uri, body, Some(token)).await
}

pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request_json(app, "DELETE", uri, body, Some(token)).await
}

/// PATCH with an empty body.
pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// DELETE with no body and only the auth header.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn request_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response's status and return its JSON body.
pub async fn expect_status(
    response: Response<Body>,
    status: StatusCode,
) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// A seeded profile plus a ready-to-use access token.
pub struct TestProfile {
    pub user_id: DbId,
    pub profile_id: DbId,
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Create a user + profile + sub-record directly through the repository
/// layer and mint an access token with the test secret.
pub async fn seed_profile(pool: &PgPool, username: &str, kind: &str) -> TestProfile {
    let skill_id = SkillRepo::upsert(pool, "design").await.expect("skill upsert");

    let password = "test_password_123!";
    let signup = CreateSignup {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(password).expect("hashing should succeed"),
        kind: kind.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        birth_date: chrono::NaiveDate::from_ymd_opt(1998, 4, 12).unwrap(),
        skill_ids: vec![skill_id],
        university_id: None,
        major_id: None,
    };
    let profile = ProfileRepo::create_signup(pool, &signup)
        .await
        .expect("signup should succeed");

    let token = generate_access_token(profile.user_id, profile.id, kind, &test_jwt_config())
        .expect("token generation should succeed");

    TestProfile {
        user_id: profile.user_id,
        profile_id: profile.id,
        username: username.to_string(),
        password: password.to_string(),
        token,
    }
}

/// Seed a market row and return its id.
pub async fn seed_market(pool: &PgPool, name: &str) -> DbId {
    nexo_db::repositories::MarketRepo::upsert(pool, name)
        .await
        .expect("market upsert")
}

/// Create a project through the API as the given profile; returns its id.
pub async fn create_project_via_api(app: Router, pool: &PgPool, owner: &TestProfile) -> DbId {
    seed_market(pool, "technology").await;

    let body = serde_json::json!({
        "category": "startup",
        "name": "Test Project",
        "slogan": "Build things",
        "markets": ["technology"],
    });
    let response = post_json_auth(app, "/api/projects/create-project", body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    sqlx::query_scalar("SELECT id FROM projects ORDER BY id DESC LIMIT 1")
        .fetch_one(pool)
        .await
        .expect("project should exist")
}
