//! Repository for the `project_stars` table.
//!
//! Uniqueness is the table constraint; inserts are insert-or-fail so two
//! concurrent identical calls can never both succeed.

use sqlx::PgPool;

use nexo_core::types::DbId;

pub struct StarRepo;

impl StarRepo {
    /// Star a project. Returns `false` when the profile already starred it.
    pub async fn add(pool: &PgPool, project_id: DbId, profile_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO project_stars (project_id, profile_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_project_stars_project_profile DO NOTHING",
        )
        .bind(project_id)
        .bind(profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a star. Returns `false` when there was none.
    pub async fn remove(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_stars WHERE project_id = $1 AND profile_id = $2")
                .bind(project_id)
                .bind(profile_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_rows(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM project_stars WHERE project_id = $1 AND profile_id = $2",
        )
        .bind(project_id)
        .bind(profile_id)
        .fetch_one(pool)
        .await
    }
}
