//! Integration tests for the signup validation sequence and the
//! profile 1:1 invariants.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use sqlx::PgPool;

use nexo_db::repositories::{SkillRepo, UniversityRepo};

fn signup_body(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "hunter22",
        "passwordc": "hunter22",
        "first_name": "Ana",
        "last_name": "Silva",
        "birth_date": "1999-03-20",
        "skills_names": ["design"],
    })
}

async fn seed_lookups(pool: &PgPool) {
    SkillRepo::upsert(pool, "design").await.expect("skill upsert");
    UniversityRepo::create(pool, "USP", None).await.expect("university");
    UniversityRepo::create_major(pool, "computer engineering")
        .await
        .expect("major");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_signup_creates_all_rows(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = signup_body("anaclara");
    body["university_name"] = "USP".into();
    body["major_name"] = "computer engineering".into();

    let response = post_json(app, "/api/profiles/student/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (user_count, profile_count, student_count, mentor_count): (i64, i64, i64, i64) =
        sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM users),
                    (SELECT COUNT(*) FROM profiles),
                    (SELECT COUNT(*) FROM students),
                    (SELECT COUNT(*) FROM mentors)",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((user_count, profile_count, student_count, mentor_count), (1, 1, 1, 0));

    let kind: String = sqlx::query_scalar("SELECT kind FROM profiles LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(kind, "student");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mentor_signup_creates_mentor_row(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/profiles/mentor/post-signup", signup_body("mentora")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mentor_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mentors")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(mentor_count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_username_is_normalized(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = signup_body("x");
    body["username"] = " Ana Clara ".into();
    let response = post_json(app, "/api/profiles/mentor/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let username: String = sqlx::query_scalar("SELECT username FROM users LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(username, "anaclara");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_password_mismatch_rejected(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = signup_body("mismatch");
    body["passwordc"] = "different1".into();
    let response = post_json(app, "/api/profiles/student/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, "As senhas devem ser iguais!");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_short_password_rejected(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = signup_body("shorty");
    body["password"] = "five5".into();
    body["passwordc"] = "five5".into();
    let response = post_json(app, "/api/profiles/student/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        "A senha deve ter pelo menos 6 caracteres!"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_username_rejected(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response =
        post_json(app.clone(), "/api/profiles/mentor/post-signup", signup_body("taken")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = signup_body("taken");
    body["email"] = "other@test.com".into();
    let response = post_json(app, "/api/profiles/mentor/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, "Nome de usuário já utilizado!");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_birth_dates_rejected(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool);

    for bad_date in ["2999-01-01", "20/03/1999", "1500-01-01", ""] {
        let mut body = signup_body("datecase");
        body["birth_date"] = bad_date.into();
        let response = post_json(app.clone(), "/api/profiles/student/post-signup", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "date: {bad_date}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_university_rejected_and_rolls_back(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = signup_body("rollback");
    body["university_name"] = "Unknown U".into();
    body["major_name"] = "computer engineering".into();
    let response = post_json(app, "/api/profiles/student/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, "Universidade inválida!");

    // Nothing was half-created.
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(user_count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_no_valid_skills_rejected(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = signup_body("skillless");
    body["skills_names"] = serde_json::json!(["nonexistent-skill"]);
    let response = post_json(app, "/api/profiles/student/post-signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        "Selecione pelo menos uma habilidade válida!"
    );
}

/// A second profile for the same user violates the 1:1 constraint.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_user_is_one_to_one(pool: PgPool) {
    seed_lookups(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/profiles/mentor/post-signup", signup_body("unique")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    let result = sqlx::query("INSERT INTO profiles (user_id, kind) VALUES ($1, 'mentor')")
        .bind(user_id)
        .execute(&pool)
        .await;
    assert!(result.is_err(), "duplicate profile must violate uq_profiles_user_id");
}
