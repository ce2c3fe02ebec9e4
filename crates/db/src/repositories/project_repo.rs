//! Repository for the `projects` table.

use sqlx::PgPool;

use nexo_core::roles::ProjectRole;
use nexo_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

const COLUMNS: &str = "id, category, name, slogan, description, image, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project with its market set and its creator as admin
    /// member, all in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        creator_profile_id: DbId,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (category, name, slogan)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.category)
            .bind(&input.name)
            .bind(&input.slogan)
            .fetch_one(&mut *tx)
            .await?;

        for market_id in &input.market_ids {
            sqlx::query("INSERT INTO project_markets (project_id, market_id) VALUES ($1, $2)")
                .bind(project.id)
                .bind(market_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("INSERT INTO project_members (project_id, profile_id, role) VALUES ($1, $2, $3)")
            .bind(project.id)
            .bind(creator_profile_id)
            .bind(ProjectRole::Admin.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest projects first, capped. The public listing shows 30.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Projects matching any of the categories AND any of the market
    /// names, distinct, ascending id.
    pub async fn list_filtered(
        pool: &PgPool,
        categories: &[String],
        market_names: &[String],
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {COLUMNS} FROM projects
             WHERE category = ANY($1)
               AND EXISTS (
                   SELECT 1 FROM project_markets pm
                   JOIN markets m ON m.id = pm.market_id
                   WHERE pm.project_id = projects.id AND m.name = ANY($2))
             ORDER BY id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(categories)
            .bind(market_names)
            .fetch_all(pool)
            .await
    }

    /// Projects a profile is a member of, newest first.
    pub async fn list_for_profile(pool: &PgPool, profile_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE id IN (SELECT project_id FROM project_members WHERE profile_id = $1)
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
    }

    /// Replace category/name/slogan and the market set.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateProject) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE projects SET category = $2, name = $3, slogan = $4, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.category)
        .bind(&input.name)
        .bind(&input.slogan)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM project_markets WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for market_id in &input.market_ids {
            sqlx::query("INSERT INTO project_markets (project_id, market_id) VALUES ($1, $2)")
                .bind(id)
                .bind(market_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn update_description(
        pool: &PgPool,
        id: DbId,
        description: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET description = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(description)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn star_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM project_stars WHERE project_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn discussion_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM discussions WHERE project_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
