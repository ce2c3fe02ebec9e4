//! Project entity models and DTOs: the project row itself, memberships,
//! pending requests, stars, and links.

use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub category: String,
    pub name: String,
    pub slogan: String,
    pub description: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. The creator becomes its admin member.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub category: String,
    pub name: String,
    pub slogan: String,
    pub market_ids: Vec<DbId>,
}

/// DTO for the admin project-edit operation.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub category: String,
    pub name: String,
    pub slogan: String,
    pub market_ids: Vec<DbId>,
}

/// A membership row joined with the member's profile fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub profile_id: DbId,
    pub role: String,
    pub username: String,
    pub kind: String,
    pub first_name: String,
    pub last_name: String,
    pub photo: String,
}

/// A pending invitation / entry-request row, joined with the profile it
/// belongs to and the project it targets.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRequest {
    pub id: DbId,
    pub project_id: DbId,
    pub profile_id: DbId,
    pub kind: String,
    pub message: Option<String>,
    pub username: String,
    pub project_name: String,
    pub created_at: Timestamp,
}

/// A project link row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectLink {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub href: String,
}
