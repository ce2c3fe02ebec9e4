//! Repository for the `project_requests` table.
//!
//! A request row is the only persisted state of the invitation /
//! entry-request protocol: replying deletes it, acceptance additionally
//! creates the membership (see the membership handlers).

use sqlx::PgPool;

use nexo_core::roles::RequestKind;
use nexo_core::types::{DbId, Timestamp};

use crate::models::project::ProjectRequest;

/// Request rows joined with the requesting profile's username and the
/// target project's name.
const JOINED_COLUMNS: &str = "r.id, r.project_id, r.profile_id, r.kind, r.message, u.username, pr.name AS project_name, r.created_at";

/// A pending entry request paired with the viewing member's own role on
/// the project, for the two-step admin filter in the notification feed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RequestWithViewerRole {
    pub id: DbId,
    pub project_id: DbId,
    pub profile_id: DbId,
    pub kind: String,
    pub message: Option<String>,
    pub username: String,
    pub project_name: String,
    pub created_at: Timestamp,
    pub viewer_role: String,
}

impl RequestWithViewerRole {
    pub fn into_request(self) -> ProjectRequest {
        ProjectRequest {
            id: self.id,
            project_id: self.project_id,
            profile_id: self.profile_id,
            kind: self.kind,
            message: self.message,
            username: self.username,
            project_name: self.project_name,
            created_at: self.created_at,
        }
    }
}

pub struct RequestRepo;

impl RequestRepo {
    /// Insert a pending request. Returns `false` when one of this kind
    /// already exists for the (project, profile) pair.
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
        kind: RequestKind,
        message: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO project_requests (project_id, profile_id, kind, message)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_project_requests_project_profile_kind DO NOTHING",
        )
        .bind(project_id)
        .bind(profile_id)
        .bind(kind.as_str())
        .bind(message)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
        kind: RequestKind,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM project_requests
             WHERE project_id = $1 AND profile_id = $2 AND kind = $3)",
        )
        .bind(project_id)
        .bind(profile_id)
        .bind(kind.as_str())
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM project_requests r
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             JOIN projects pr ON pr.id = r.project_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a pending request for a (project, profile, kind) triple.
    pub async fn delete_pending(
        pool: &PgPool,
        project_id: DbId,
        profile_id: DbId,
        kind: RequestKind,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM project_requests WHERE project_id = $1 AND profile_id = $2 AND kind = $3",
        )
        .bind(project_id)
        .bind(profile_id)
        .bind(kind.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Pending invitations addressed to a profile, newest first.
    pub async fn list_invitations_for_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM project_requests r
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             JOIN projects pr ON pr.id = r.project_id
             WHERE r.profile_id = $1 AND r.kind = 'invitation'
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
    }

    /// Pending entry requests on every project the viewer belongs to,
    /// each carrying the viewer's own role on that project. The caller
    /// discards rows where the role is not `admin`.
    pub async fn list_entry_requests_for_member(
        pool: &PgPool,
        viewer_profile_id: DbId,
    ) -> Result<Vec<RequestWithViewerRole>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, pm.role AS viewer_role
             FROM project_requests r
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             JOIN projects pr ON pr.id = r.project_id
             JOIN project_members pm ON pm.project_id = r.project_id AND pm.profile_id = $1
             WHERE r.kind = 'entry_request'
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, RequestWithViewerRole>(&query)
            .bind(viewer_profile_id)
            .fetch_all(pool)
            .await
    }

    /// Pending requests of one kind on a project (the admin view).
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        kind: RequestKind,
    ) -> Result<Vec<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM project_requests r
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             JOIN projects pr ON pr.id = r.project_id
             WHERE r.project_id = $1 AND r.kind = $2
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(project_id)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }
}
