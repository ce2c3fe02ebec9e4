//! Repository for the `project_members` join table.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::project::ProjectMember;

/// Membership rows joined with member profile fields.
const JOINED_COLUMNS: &str = "pm.id, pm.project_id, pm.profile_id, pm.role, u.username, p.kind, p.first_name, p.last_name, p.photo";

pub struct MemberRepo;

impl MemberRepo {
    /// The caller's role in a project, when a member.
    pub async fn role_of(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT role FROM project_members WHERE project_id = $1 AND profile_id = $2",
        )
        .bind(project_id)
        .bind(profile_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn is_member(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::role_of(pool, project_id, profile_id).await?.is_some())
    }

    /// Insert a membership. Returns `false` when the profile already
    /// holds one (unique constraint, no pre-check).
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO project_members (project_id, profile_id, role) VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_project_members_project_profile DO NOTHING",
        )
        .bind(project_id)
        .bind(profile_id)
        .bind(role)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn remove(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND profile_id = $2")
                .bind(project_id)
                .bind(profile_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All members of a project with profile fields, admins first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMember>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM project_members pm
             JOIN profiles p ON p.id = pm.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE pm.project_id = $1
             ORDER BY pm.role, pm.id"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
