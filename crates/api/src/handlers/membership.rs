//! Membership workflow handlers: invitations, entry requests, member
//! removal, leaving, and project stars.
//!
//! A request row is pending state; replying consumes (deletes) it, and
//! acceptance additionally creates the membership. There is no persisted
//! rejected state.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use nexo_core::roles::{ProjectRole, RequestKind};
use nexo_core::types::DbId;
use nexo_core::validation::enforce_char_limits;
use nexo_db::repositories::{MemberRepo, ProfileRepo, RequestRepo, StarRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::project::{require_project, require_project_admin};
use crate::middleware::auth::AuthProfile;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body carrying a username list (invite / uninvite / remove).
#[derive(Debug, Deserialize)]
pub struct UsernamesInput {
    pub usernames: Vec<String>,
}

/// Body of `ask-to-join-project`.
#[derive(Debug, Deserialize)]
pub struct AskToJoinInput {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `reply-project-invitation`.
#[derive(Debug, Deserialize)]
pub struct ReplyInvitationInput {
    pub project_id: DbId,
    pub reply: String,
}

/// Body of `reply-project-entering-request`.
#[derive(Debug, Deserialize)]
pub struct ReplyEntryRequestInput {
    pub request_id: DbId,
    pub reply: String,
}

/// Parse an accept/reject literal.
fn parse_reply(reply: &str) -> AppResult<bool> {
    match reply {
        "accept" => Ok(true),
        "reject" => Ok(false),
        _ => Err(AppError::BadRequest("Resposta inválida!".into())),
    }
}

// ---------------------------------------------------------------------------
// Invitations
// ---------------------------------------------------------------------------

/// POST /api/projects/invite-users-to-project/{id} -- admin only.
///
/// Each username must exist, must not already be a member, and must not
/// already have a pending invitation.
pub async fn invite_users_to_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<UsernamesInput>,
) -> AppResult<Json<&'static str>> {
    require_project_admin(&state, project_id, auth.profile_id).await?;

    for username in &input.usernames {
        let profile = ProfileRepo::find_by_username(&state.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado!".into()))?;

        if MemberRepo::is_member(&state.pool, project_id, profile.id).await? {
            return Err(AppError::BadRequest(format!(
                "{username} já é membro do projeto!"
            )));
        }

        let created = RequestRepo::add(
            &state.pool,
            project_id,
            profile.id,
            RequestKind::Invitation,
            None,
        )
        .await?;
        if !created {
            return Err(AppError::BadRequest(format!(
                "{username} já foi convidado para o projeto!"
            )));
        }
    }

    Ok(Json("success"))
}

/// POST /api/projects/uninvite-users-from-project/{id} -- admin only.
pub async fn uninvite_users_from_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<UsernamesInput>,
) -> AppResult<Json<&'static str>> {
    require_project_admin(&state, project_id, auth.profile_id).await?;

    for username in &input.usernames {
        let profile = ProfileRepo::find_by_username(&state.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado!".into()))?;

        let deleted = RequestRepo::delete_pending(
            &state.pool,
            project_id,
            profile.id,
            RequestKind::Invitation,
        )
        .await?;
        if !deleted {
            return Err(AppError::BadRequest(format!(
                "{username} não foi convidado para o projeto!"
            )));
        }
    }

    Ok(Json("success"))
}

/// POST /api/projects/reply-project-invitation
///
/// Requires a pending invitation for (caller, project). Accepting
/// creates a `member`-role membership; either way the row is consumed.
pub async fn reply_project_invitation(
    State(state): State<AppState>,
    auth: AuthProfile,
    ApiJson(input): ApiJson<ReplyInvitationInput>,
) -> AppResult<Json<&'static str>> {
    let accepted = parse_reply(&input.reply)?;
    require_project(&state, input.project_id).await?;

    let deleted = RequestRepo::delete_pending(
        &state.pool,
        input.project_id,
        auth.profile_id,
        RequestKind::Invitation,
    )
    .await?;
    if !deleted {
        return Err(AppError::BadRequest(
            "Você não foi convidado para o projeto!".into(),
        ));
    }

    if accepted {
        MemberRepo::add(
            &state.pool,
            input.project_id,
            auth.profile_id,
            ProjectRole::Member.as_str(),
        )
        .await?;
    }

    Ok(Json("success"))
}

// ---------------------------------------------------------------------------
// Entry requests
// ---------------------------------------------------------------------------

/// POST /api/projects/ask-to-join-project/{id}
///
/// Three distinct pre-conditions, each with its own message: already a
/// member, already invited, already asked.
pub async fn ask_to_join_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<AskToJoinInput>,
) -> AppResult<Json<&'static str>> {
    require_project(&state, project_id).await?;

    if MemberRepo::is_member(&state.pool, project_id, auth.profile_id).await? {
        return Err(AppError::BadRequest("Você já é membro do projeto!".into()));
    }
    if RequestRepo::exists(&state.pool, project_id, auth.profile_id, RequestKind::Invitation).await? {
        return Err(AppError::BadRequest(
            "Você já foi convidado para entrar no projeto!".into(),
        ));
    }

    let message = input.message.as_deref().map(str::trim).filter(|m| !m.is_empty());
    if let Some(message) = message {
        enforce_char_limits(&[(message, 500)])?;
    }

    let created = RequestRepo::add(
        &state.pool,
        project_id,
        auth.profile_id,
        RequestKind::EntryRequest,
        message,
    )
    .await?;
    if !created {
        return Err(AppError::BadRequest(
            "Você já pediu para entrar no projeto!".into(),
        ));
    }

    Ok(Json("success"))
}

/// POST /api/projects/reply-project-entering-request
///
/// The caller must administer the request's project; otherwise 401 and
/// the request is untouched. Accepting creates the membership for the
/// *requesting* profile; either way the row is consumed.
pub async fn reply_project_entering_request(
    State(state): State<AppState>,
    auth: AuthProfile,
    ApiJson(input): ApiJson<ReplyEntryRequestInput>,
) -> AppResult<Json<&'static str>> {
    let accepted = parse_reply(&input.reply)?;

    let request = RequestRepo::find_by_id(&state.pool, input.request_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Solicitação não encontrada!".into()))?;

    if request.kind != RequestKind::EntryRequest.as_str() {
        return Err(AppError::BadRequest("Solicitação não encontrada!".into()));
    }

    require_project_admin(&state, request.project_id, auth.profile_id).await?;

    RequestRepo::delete_by_id(&state.pool, request.id).await?;

    if accepted {
        MemberRepo::add(
            &state.pool,
            request.project_id,
            request.profile_id,
            ProjectRole::Member.as_str(),
        )
        .await?;
    }

    Ok(Json("success"))
}

// ---------------------------------------------------------------------------
// Member removal / leaving
// ---------------------------------------------------------------------------

/// POST /api/projects/remove-users-from-project/{id} -- admin only.
pub async fn remove_users_from_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<UsernamesInput>,
) -> AppResult<Json<&'static str>> {
    require_project_admin(&state, project_id, auth.profile_id).await?;

    for username in &input.usernames {
        let profile = ProfileRepo::find_by_username(&state.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado!".into()))?;

        if profile.id == auth.profile_id {
            return Err(AppError::BadRequest(
                "Para sair do projeto use a opção de deixar o projeto!".into(),
            ));
        }

        let removed = MemberRepo::remove(&state.pool, project_id, profile.id).await?;
        if !removed {
            return Err(AppError::BadRequest(format!(
                "{username} não é membro do projeto!"
            )));
        }
    }

    Ok(Json("success"))
}

/// POST /api/projects/leave-project/{id}
pub async fn leave_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    require_project(&state, project_id).await?;

    let removed = MemberRepo::remove(&state.pool, project_id, auth.profile_id).await?;
    if !removed {
        return Err(AppError::BadRequest("Você não é membro do projeto!".into()));
    }

    Ok(Json("success"))
}

// ---------------------------------------------------------------------------
// Project stars
// ---------------------------------------------------------------------------

/// POST /api/projects/star-project/{id}
///
/// The unique constraint is the only guard: a duplicate insert affects
/// zero rows and answers 400, under any interleaving.
pub async fn star_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    require_project(&state, project_id).await?;

    let created = StarRepo::add(&state.pool, project_id, auth.profile_id).await?;
    if !created {
        return Err(AppError::BadRequest("Você já curtiu esse projeto!".into()));
    }

    Ok(Json("success"))
}

/// POST /api/projects/unstar-project/{id}
pub async fn unstar_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    require_project(&state, project_id).await?;

    let removed = StarRepo::remove(&state.pool, project_id, auth.profile_id).await?;
    if !removed {
        return Err(AppError::BadRequest("Você não curtiu esse projeto!".into()));
    }

    Ok(Json("success"))
}
