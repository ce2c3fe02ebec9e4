//! Repository for the `project_links` table.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::project::ProjectLink;

const COLUMNS: &str = "id, project_id, name, href";

pub struct LinkRepo;

impl LinkRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        name: &str,
        href: &str,
    ) -> Result<ProjectLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_links (project_id, name, href)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectLink>(&query)
            .bind(project_id)
            .bind(name)
            .bind(href)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_links WHERE id = $1");
        sqlx::query_as::<_, ProjectLink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_links WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProjectLink>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
