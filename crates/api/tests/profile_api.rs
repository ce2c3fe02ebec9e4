//! Integration tests for profile detail, editing, and the directory.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, put_json_auth, seed_profile};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_profile_detail(pool: PgPool) {
    seed_profile(&pool, "ana", "student").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/profiles/get-profile/ana").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "ana");
    assert_eq!(json["kind"], "student");
    assert_eq!(json["bio"], "Sem bio...");
    assert_eq!(json["skills"], serde_json::json!(["design"]));

    let response = get(app, "/api/profiles/get-profile/nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_my_profile_requires_auth(pool: PgPool) {
    let ana = seed_profile(&pool, "ana", "student").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/profiles/get-my-profile", &ana.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "ana");

    let response = get(app, "/api/profiles/get-my-profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_edit_profile(pool: PgPool) {
    let ana = seed_profile(&pool, "ana", "student").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "username": "ana",
        "first_name": "Ana",
        "last_name": "Clara",
        "bio": "Building things",
        "linkedin": "in/anaclara",
        "skills_names": ["design"],
    });
    let response = put_json_auth(app, "/api/profiles/edit-my-profile", body, &ana.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (bio, linkedin): (String, String) =
        sqlx::query_as("SELECT bio, linkedin FROM profiles WHERE id = $1")
            .bind(ana.profile_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(bio, "Building things");
    assert_eq!(linkedin, "in/anaclara");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_edit_profile_rejects_taken_username(pool: PgPool) {
    let _bia = seed_profile(&pool, "bia", "student").await;
    let ana = seed_profile(&pool, "ana", "student").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "bia",
        "first_name": "Ana",
        "last_name": "Clara",
        "bio": "bio",
        "skills_names": ["design"],
    });
    let response = put_json_auth(app, "/api/profiles/edit-my-profile", body, &ana.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, "Nome de usuário já utilizado!");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_edit_profile_blank_required_fields(pool: PgPool) {
    let ana = seed_profile(&pool, "ana", "student").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "ana",
        "first_name": "Ana",
        "last_name": "Clara",
        "bio": "  ",
        "skills_names": ["design"],
    });
    let response = put_json_auth(app, "/api/profiles/edit-my-profile", body, &ana.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        "Os campos nome de usuário, nome, sobrenome e bio são obrigatórios!"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_filtered_profiles_substring(pool: PgPool) {
    seed_profile(&pool, "anaclara", "student").await;
    seed_profile(&pool, "mariana", "student").await;
    seed_profile(&pool, "bob", "mentor").await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/profiles/get-filtered-profiles/ana").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Both usernames contain "ana".
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_list_kind_filter_and_isall(pool: PgPool) {
    seed_profile(&pool, "student1", "student").await;
    seed_profile(&pool, "student2", "student").await;
    seed_profile(&pool, "mentor1", "mentor").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/profiles/get-profile-list?kind=student").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["profiles"].as_array().unwrap().len(), 2);
    assert_eq!(json["isall"], true);

    let response = get(app, "/api/profiles/get-profile-list?kind=student&length=1").await;
    let json = body_json(response).await;
    assert_eq!(json["profiles"].as_array().unwrap().len(), 1);
    assert_eq!(json["isall"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_skills_name_list(pool: PgPool) {
    seed_profile(&pool, "ana", "student").await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/profiles/get-skills-name-list").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["name"], "design");
}
