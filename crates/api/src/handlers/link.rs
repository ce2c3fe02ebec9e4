//! Handlers for project links.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use nexo_core::types::DbId;
use nexo_core::validation::enforce_char_limits;
use nexo_db::repositories::LinkRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::project::{require_project, require_project_member};
use crate::middleware::auth::AuthProfile;
use crate::state::AppState;

/// Request body for `create-link`.
#[derive(Debug, Deserialize)]
pub struct LinkInput {
    pub name: String,
    pub href: String,
}

/// POST /api/projects/create-link/{project_id} -- members only.
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<LinkInput>,
) -> AppResult<Json<&'static str>> {
    require_project(&state, project_id).await?;
    require_project_member(&state, project_id, auth.profile_id).await?;

    let name = input.name.trim().to_string();
    let href = input.href.trim().to_string();

    if name.is_empty() || href.is_empty() {
        return Err(AppError::BadRequest(
            "Todos os campos devem ser preenchidos!".into(),
        ));
    }
    enforce_char_limits(&[(&name, 100), (&href, 300)])?;

    LinkRepo::create(&state.pool, project_id, &name, &href).await?;
    Ok(Json("success"))
}

/// DELETE /api/projects/delete-link/{link_id} -- members of the owning
/// project only.
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(link_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    let link = LinkRepo::find_by_id(&state.pool, link_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Link não encontrado!".into()))?;

    require_project_member(&state, link.project_id, auth.profile_id).await?;

    LinkRepo::delete(&state.pool, link.id).await?;
    Ok(Json("success"))
}
