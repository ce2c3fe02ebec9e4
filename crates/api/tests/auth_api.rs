//! HTTP-level integration tests for the token endpoints: login, refresh
//! rotation, logout, and the auth extractor.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, seed_profile};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let profile = seed_profile(&pool, "loginuser", "student").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": profile.password });
    let response = post_json(app, "/token/", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["refresh_token"].is_string(), "response must contain refresh_token");
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["email"], "loginuser@test.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    seed_profile(&pool, "wrongpw", "student").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/token/", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever123" });
    let response = post_json(app, "/token/", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing rotates the token: the new pair works, the old one is dead.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotation(pool: PgPool) {
    let profile = seed_profile(&pool, "refresher", "mentor").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "username": "refresher", "password": profile.password });
    let login = body_json(post_json(app.clone(), "/token/", body).await).await;
    let old_refresh = login["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds.
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app.clone(), "/token/refresh/", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Replaying the consumed token fails.
    let response = post_json(app, "/token/refresh/", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let profile = seed_profile(&pool, "leaver", "student").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "username": "leaver", "password": profile.password });
    let login = body_json(post_json(app.clone(), "/token/", body).await).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let response = post_json_auth(
        app.clone(),
        "/token/logout/",
        serde_json::json!({}),
        &profile.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The refresh token no longer works.
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/token/refresh/", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/profiles/get-my-profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/profiles/get-my-profile", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unmatched_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/projects/no-such-route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json, "Rota não encontrada!");
}
