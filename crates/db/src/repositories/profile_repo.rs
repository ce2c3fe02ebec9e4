//! Repository for profiles and their role sub-records.

use sqlx::PgPool;

use nexo_core::profile_kind::ProfileKind;
use nexo_core::types::DbId;

use crate::models::profile::{
    CreateSignup, Profile, ProfileListFilter, ProfileWithUsername, UpdateProfile,
};

const COLUMNS: &str = "id, user_id, kind, first_name, last_name, bio, linkedin, photo, birth_date, created_at, updated_at";

/// Columns of the profile-with-username join shape.
const JOINED_COLUMNS: &str = "p.id, u.username, p.kind, p.first_name, p.last_name, p.bio, p.linkedin, p.photo, p.birth_date";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Create the user, its profile, the kind sub-record, and the skill
    /// links as one unit. Any failure rolls the whole signup back.
    pub async fn create_signup(pool: &PgPool, input: &CreateSignup) -> Result<Profile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: DbId = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO profiles (user_id, kind, first_name, last_name, birth_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.kind)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_date)
            .fetch_one(&mut *tx)
            .await?;

        if input.kind == ProfileKind::Student.as_str() {
            sqlx::query("INSERT INTO students (profile_id, university_id, major_id) VALUES ($1, $2, $3)")
                .bind(profile.id)
                .bind(input.university_id)
                .bind(input.major_id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query("INSERT INTO mentors (profile_id) VALUES ($1)")
                .bind(profile.id)
                .execute(&mut *tx)
                .await?;
        }

        for skill_id in &input.skill_ids {
            sqlx::query("INSERT INTO profile_skills (profile_id, skill_id) VALUES ($1, $2)")
                .bind(profile.id)
                .bind(skill_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(profile)
    }

    pub async fn find_by_user_id(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<ProfileWithUsername>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE u.username = $1"
        );
        sqlx::query_as::<_, ProfileWithUsername>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Update the profile and its user's username, replacing the skill
    /// set, inside one transaction.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateProfile) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE users SET username = $2, updated_at = NOW()
             WHERE id = (SELECT user_id FROM profiles WHERE id = $1)",
        )
        .bind(id)
        .bind(&input.username)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE profiles SET
                first_name = $2,
                last_name = $3,
                bio = $4,
                linkedin = COALESCE($5, linkedin),
                photo = COALESCE($6, photo),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.bio)
        .bind(&input.linkedin)
        .bind(&input.photo)
        .execute(&mut *tx)
        .await?;

        if input.university_id.is_some() || input.major_id.is_some() {
            sqlx::query(
                "UPDATE students SET university_id = $2, major_id = $3 WHERE profile_id = $1",
            )
            .bind(id)
            .bind(input.university_id)
            .bind(input.major_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM profile_skills WHERE profile_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for skill_id in &input.skill_ids {
            sqlx::query("INSERT INTO profile_skills (profile_id, skill_id) VALUES ($1, $2)")
                .bind(id)
                .bind(skill_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Username substring search, capped at `limit`, newest profile first.
    pub async fn search_by_username(
        pool: &PgPool,
        fragment: &str,
        limit: i64,
    ) -> Result<Vec<ProfileWithUsername>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE u.username ILIKE '%' || $1 || '%'
             ORDER BY p.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ProfileWithUsername>(&query)
            .bind(fragment)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Filtered directory listing. Returns up to `limit` rows plus the
    /// total matching count so the caller can report `isall`.
    pub async fn filter_list(
        pool: &PgPool,
        filter: &ProfileListFilter,
        limit: i64,
    ) -> Result<(Vec<ProfileWithUsername>, i64), sqlx::Error> {
        let condition = "
             (p.kind = COALESCE($1, p.kind))
             AND ($2::text[] IS NULL OR EXISTS (
                 SELECT 1 FROM students s
                 LEFT JOIN universities un ON un.id = s.university_id
                 WHERE s.profile_id = p.id AND (un.name = ANY($2) OR s.university_id IS NULL)))
             AND ($3::text[] IS NULL OR EXISTS (
                 SELECT 1 FROM students s
                 LEFT JOIN majors m ON m.id = s.major_id
                 WHERE s.profile_id = p.id AND (m.name = ANY($3) OR s.major_id IS NULL)))
             AND ($4::text[] IS NULL OR EXISTS (
                 SELECT 1 FROM profile_skills ps
                 JOIN skills sk ON sk.id = ps.skill_id
                 WHERE ps.profile_id = p.id AND sk.name = ANY($4)))";

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE {condition}
             ORDER BY p.id DESC
             LIMIT $5"
        );
        let rows = sqlx::query_as::<_, ProfileWithUsername>(&query)
            .bind(&filter.kind)
            .bind(&filter.university_names)
            .bind(&filter.major_names)
            .bind(&filter.skill_names)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*) FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE {condition}"
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.kind)
            .bind(&filter.university_names)
            .bind(&filter.major_names)
            .bind(&filter.skill_names)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Names of the skills attached to a profile, alphabetical.
    pub async fn skill_names(pool: &PgPool, profile_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT sk.name FROM profile_skills ps
             JOIN skills sk ON sk.id = ps.skill_id
             WHERE ps.profile_id = $1
             ORDER BY sk.name",
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await
    }

    /// University and major names of a student profile, when set.
    pub async fn student_affiliation(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Option<(Option<String>, Option<String>)>, sqlx::Error> {
        let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT un.name, m.name FROM students s
             LEFT JOIN universities un ON un.id = s.university_id
             LEFT JOIN majors m ON m.id = s.major_id
             WHERE s.profile_id = $1",
        )
        .bind(profile_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}
