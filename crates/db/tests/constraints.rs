//! Repository-level tests for schema constraints and cascade behavior.

use sqlx::PgPool;

use nexo_db::models::profile::CreateSignup;
use nexo_db::repositories::{
    DiscussionRepo, MemberRepo, ProfileRepo, RequestRepo, SkillRepo, StarRepo,
};
use nexo_core::roles::RequestKind;

async fn seed_profile(pool: &PgPool, username: &str, kind: &str) -> i64 {
    let skill_id = SkillRepo::upsert(pool, "design").await.expect("skill");
    let signup = CreateSignup {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "$argon2id$fake".to_string(),
        kind: kind.to_string(),
        first_name: "T".to_string(),
        last_name: "U".to_string(),
        birth_date: chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        skill_ids: vec![skill_id],
        university_id: None,
        major_id: None,
    };
    ProfileRepo::create_signup(pool, &signup)
        .await
        .expect("signup")
        .id
}

async fn seed_project(pool: &PgPool, admin_profile_id: i64) -> i64 {
    let market_id = nexo_db::repositories::MarketRepo::upsert(pool, "tech")
        .await
        .expect("market");
    let project = nexo_db::repositories::ProjectRepo::create(
        pool,
        &nexo_db::models::project::CreateProject {
            category: "startup".to_string(),
            name: "P".to_string(),
            slogan: "S".to_string(),
            market_ids: vec![market_id],
        },
        admin_profile_id,
    )
    .await
    .expect("project");
    project.id
}

/// Signup writes user + profile + sub-record + skill links atomically.
#[sqlx::test(migrations = "./migrations")]
async fn test_signup_transaction_creates_sub_record(pool: PgPool) {
    seed_profile(&pool, "student1", "student").await;
    seed_profile(&pool, "mentor1", "mentor").await;

    let (students, mentors, skills): (i64, i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM students),
                (SELECT COUNT(*) FROM mentors),
                (SELECT COUNT(*) FROM profile_skills)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!((students, mentors, skills), (1, 1, 2));
}

/// Deleting the user cascades through profile, sub-record, and skills.
#[sqlx::test(migrations = "./migrations")]
async fn test_user_delete_cascades(pool: PgPool) {
    let profile_id = seed_profile(&pool, "doomed", "student").await;

    sqlx::query("DELETE FROM users")
        .execute(&pool)
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM profiles)
              + (SELECT COUNT(*) FROM students)
              + (SELECT COUNT(*) FROM profile_skills)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0, "profile {profile_id} rows must cascade away");
}

/// The membership constraint makes a second add a no-op.
#[sqlx::test(migrations = "./migrations")]
async fn test_member_uniqueness(pool: PgPool) {
    let admin = seed_profile(&pool, "admin", "student").await;
    let other = seed_profile(&pool, "other", "student").await;
    let project_id = seed_project(&pool, admin).await;

    assert!(MemberRepo::add(&pool, project_id, other, "member").await.unwrap());
    assert!(!MemberRepo::add(&pool, project_id, other, "admin").await.unwrap());

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM project_members WHERE profile_id = $1")
            .bind(other)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

/// One pending request per (project, profile, kind); the two kinds are
/// independent rows.
#[sqlx::test(migrations = "./migrations")]
async fn test_request_uniqueness_per_kind(pool: PgPool) {
    let admin = seed_profile(&pool, "admin", "student").await;
    let other = seed_profile(&pool, "other", "student").await;
    let project_id = seed_project(&pool, admin).await;

    assert!(RequestRepo::add(&pool, project_id, other, RequestKind::Invitation, None)
        .await
        .unwrap());
    assert!(!RequestRepo::add(&pool, project_id, other, RequestKind::Invitation, None)
        .await
        .unwrap());
    assert!(RequestRepo::add(&pool, project_id, other, RequestKind::EntryRequest, Some("hi"))
        .await
        .unwrap());
}

/// Project star uniqueness is constraint-enforced, not pre-checked.
#[sqlx::test(migrations = "./migrations")]
async fn test_project_star_uniqueness(pool: PgPool) {
    let admin = seed_profile(&pool, "admin", "student").await;
    let fan = seed_profile(&pool, "fan", "student").await;
    let project_id = seed_project(&pool, admin).await;

    assert!(StarRepo::add(&pool, project_id, fan).await.unwrap());
    assert!(!StarRepo::add(&pool, project_id, fan).await.unwrap());
    assert_eq!(StarRepo::count_rows(&pool, project_id, fan).await.unwrap(), 1);

    assert!(StarRepo::remove(&pool, project_id, fan).await.unwrap());
    assert!(!StarRepo::remove(&pool, project_id, fan).await.unwrap());
}

/// Visualizing stars is scoped to the discussion owner and idempotent.
#[sqlx::test(migrations = "./migrations")]
async fn test_visualize_stars_scoped_and_idempotent(pool: PgPool) {
    let owner = seed_profile(&pool, "owner", "student").await;
    let fan = seed_profile(&pool, "fan", "student").await;
    let project_id = seed_project(&pool, owner).await;

    let discussion = DiscussionRepo::create(
        &pool,
        &nexo_db::models::discussion::CreateDiscussion {
            project_id,
            profile_id: owner,
            title: "T".to_string(),
            body: "B".to_string(),
            category: "doubt".to_string(),
        },
    )
    .await
    .unwrap();
    DiscussionRepo::add_star(&pool, discussion.id, fan).await.unwrap();

    assert_eq!(DiscussionRepo::visualize_stars(&pool, owner).await.unwrap(), 1);
    assert_eq!(DiscussionRepo::visualize_stars(&pool, owner).await.unwrap(), 0);
    assert_eq!(
        DiscussionRepo::unvisualized_star_count(&pool, owner).await.unwrap(),
        0
    );
}

/// Names of lookup rows are lowercased on save.
#[sqlx::test(migrations = "./migrations")]
async fn test_lookup_names_lowercased(pool: PgPool) {
    let id_a = SkillRepo::upsert(&pool, "Design").await.unwrap();
    let id_b = SkillRepo::upsert(&pool, "design").await.unwrap();
    assert_eq!(id_a, id_b, "case-variant names resolve to one row");

    let name: String = sqlx::query_scalar("SELECT name FROM skills WHERE id = $1")
        .bind(id_a)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "design");
}
