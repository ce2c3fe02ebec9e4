//! Handlers for project discussions, their stars, and their replies.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use nexo_core::categories::DiscussionCategory;
use nexo_core::error::CoreError;
use nexo_core::types::DbId;
use nexo_core::validation::enforce_char_limits;
use nexo_db::models::discussion::{CreateDiscussion, Discussion, DiscussionReply, DiscussionStar};
use nexo_db::repositories::DiscussionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::project::{require_project, require_project_member};
use crate::middleware::auth::AuthProfile;
use crate::state::AppState;

/// Request body for `create-project-discussion`.
#[derive(Debug, Deserialize)]
pub struct DiscussionInput {
    pub title: String,
    pub body: String,
    pub category: String,
}

/// Request body for `reply-discussion`.
#[derive(Debug, Deserialize)]
pub struct ReplyInput {
    pub content: String,
}

/// Request body for `delete-project-discussion`.
#[derive(Debug, Deserialize)]
pub struct DeleteDiscussionInput {
    pub discussion_id: DbId,
}

/// Discussion with its stars and replies, as returned by the detail endpoint.
#[derive(Debug, Serialize)]
pub struct DiscussionDetail {
    #[serde(flatten)]
    pub discussion: Discussion,
    pub stars: Vec<DiscussionStar>,
    pub replies: Vec<DiscussionReply>,
}

/// POST /api/projects/create-project-discussion/{project_id} -- members only.
pub async fn create_project_discussion(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<DiscussionInput>,
) -> AppResult<Json<Discussion>> {
    require_project(&state, project_id).await?;
    require_project_member(&state, project_id, auth.profile_id).await?;

    let title = input.title.trim().to_string();
    let body = input.body.trim().to_string();

    if title.is_empty() || body.is_empty() {
        return Err(AppError::BadRequest(
            "Todos os campos devem ser preenchidos!".into(),
        ));
    }
    enforce_char_limits(&[(&title, 125), (&body, 1000)])?;
    let category = DiscussionCategory::parse(&input.category)?;

    let discussion = DiscussionRepo::create(
        &state.pool,
        &CreateDiscussion {
            project_id,
            profile_id: auth.profile_id,
            title,
            body,
            category: category.value().to_string(),
        },
    )
    .await?;

    Ok(Json(discussion))
}

/// GET /api/projects/get-project-discussions/{project_id}
pub async fn get_project_discussions(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Discussion>>> {
    require_project(&state, project_id).await?;
    let discussions = DiscussionRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(discussions))
}

/// GET /api/projects/get-project-discussion/{discussion_id}
pub async fn get_project_discussion(
    State(state): State<AppState>,
    Path(discussion_id): Path<DbId>,
) -> AppResult<Json<DiscussionDetail>> {
    let discussion = DiscussionRepo::find_by_id(&state.pool, discussion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Discussão não encontrada!".into()))?;

    let stars = DiscussionRepo::list_stars(&state.pool, discussion_id).await?;
    let replies = DiscussionRepo::list_replies(&state.pool, discussion_id).await?;

    Ok(Json(DiscussionDetail {
        discussion,
        stars,
        replies,
    }))
}

/// DELETE /api/projects/delete-project-discussion -- owner only.
pub async fn delete_project_discussion(
    State(state): State<AppState>,
    auth: AuthProfile,
    ApiJson(input): ApiJson<DeleteDiscussionInput>,
) -> AppResult<Json<&'static str>> {
    let discussion = DiscussionRepo::find_by_id(&state.pool, input.discussion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Discussão não encontrada!".into()))?;

    if discussion.profile_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Unauthorized(
            "A discussão não é sua!".into(),
        )));
    }

    DiscussionRepo::delete(&state.pool, discussion.id).await?;
    Ok(Json("success"))
}

/// POST /api/projects/star-discussion/{discussion_id}
///
/// Constraint-guarded: a second star from the same profile answers 400
/// and leaves exactly one row.
pub async fn star_discussion(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(discussion_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    DiscussionRepo::find_by_id(&state.pool, discussion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Discussão não encontrada!".into()))?;

    let created = DiscussionRepo::add_star(&state.pool, discussion_id, auth.profile_id).await?;
    if !created {
        return Err(AppError::BadRequest("Você já curtiu essa discussão!".into()));
    }

    Ok(Json("success"))
}

/// POST /api/projects/unstar-discussion/{discussion_id}
pub async fn unstar_discussion(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(discussion_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    DiscussionRepo::find_by_id(&state.pool, discussion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Discussão não encontrada!".into()))?;

    let removed = DiscussionRepo::remove_star(&state.pool, discussion_id, auth.profile_id).await?;
    if !removed {
        return Err(AppError::BadRequest(
            "Você não curtiu essa discussão!".into(),
        ));
    }

    Ok(Json("success"))
}

/// POST /api/projects/reply-discussion/{discussion_id}
pub async fn reply_discussion(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(discussion_id): Path<DbId>,
    ApiJson(input): ApiJson<ReplyInput>,
) -> AppResult<Json<&'static str>> {
    DiscussionRepo::find_by_id(&state.pool, discussion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Discussão não encontrada!".into()))?;

    let content = input.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest(
            "O comentário não pode estar em branco!".into(),
        ));
    }
    enforce_char_limits(&[(&content, 125)])?;

    DiscussionRepo::add_reply(&state.pool, discussion_id, auth.profile_id, &content).await?;
    Ok(Json("success"))
}

/// DELETE /api/projects/delete-discussion-reply/{reply_id} -- author only.
pub async fn delete_discussion_reply(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(reply_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    let reply = DiscussionRepo::find_reply(&state.pool, reply_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comentário não encontrado!".into()))?;

    if reply.profile_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Unauthorized(
            "O comentário não é seu!".into(),
        )));
    }

    DiscussionRepo::delete_reply(&state.pool, reply.id).await?;
    Ok(Json("success"))
}
