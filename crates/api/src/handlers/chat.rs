//! Chat handlers: chat list with unread counts, paged message history,
//! message send, chat creation, and read receipts.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use nexo_core::types::DbId;
use nexo_core::validation::enforce_char_limits;
use nexo_db::models::chat::Message;
use nexo_db::repositories::{ChatRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthProfile;
use crate::query::ScrollParams;
use crate::state::AppState;

/// Request body for `create-message`.
#[derive(Debug, Deserialize)]
pub struct MessageInput {
    pub content: String,
}

/// Request body for `create-chat`: the other members' usernames.
#[derive(Debug, Deserialize)]
pub struct CreateChatInput {
    pub members: Vec<String>,
}

/// One entry of the chat-list response.
#[derive(Debug, Serialize)]
pub struct ChatOut {
    pub id: DbId,
    pub members: Vec<String>,
    pub unvisualized_count: i64,
    pub last_message_at: nexo_core::types::Timestamp,
}

/// GET /api/chats/get-chats-list
///
/// The caller's chats that contain at least one message, most recently
/// active first, each with the caller's unread count.
pub async fn get_chats_list(
    State(state): State<AppState>,
    auth: AuthProfile,
) -> AppResult<Json<Vec<ChatOut>>> {
    let entries = ChatRepo::list_for_profile(&state.pool, auth.profile_id).await?;

    let mut chats = Vec::with_capacity(entries.len());
    for entry in entries {
        let members = ChatRepo::member_usernames(&state.pool, entry.id).await?;
        chats.push(ChatOut {
            id: entry.id,
            members,
            unvisualized_count: entry.unvisualized_count,
            last_message_at: entry.last_message_at,
        });
    }

    Ok(Json(chats))
}

/// GET /api/chats/get-chat-messages/{chat_id}?scroll-index=&batch-length=
pub async fn get_chat_messages(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(chat_id): Path<DbId>,
    Query(params): Query<ScrollParams>,
) -> AppResult<Json<Vec<Message>>> {
    require_chat_member(&state, chat_id, auth.profile_id).await?;

    let (offset, limit) = params.window();
    let messages = ChatRepo::messages_page(&state.pool, chat_id, offset, limit).await?;
    Ok(Json(messages))
}

/// POST /api/chats/create-message/{chat_id}
pub async fn create_message(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(chat_id): Path<DbId>,
    ApiJson(input): ApiJson<MessageInput>,
) -> AppResult<Json<&'static str>> {
    require_chat_member(&state, chat_id, auth.profile_id).await?;

    let content = input.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest(
            "A mensagem não pode estar em branco!".into(),
        ));
    }
    enforce_char_limits(&[(&content, 1000)])?;

    ChatRepo::create_message(&state.pool, chat_id, auth.profile_id, &content).await?;
    Ok(Json("success"))
}

/// POST /api/chats/create-chat
///
/// Creates a chat whose members are the caller plus the given usernames.
pub async fn create_chat(
    State(state): State<AppState>,
    auth: AuthProfile,
    ApiJson(input): ApiJson<CreateChatInput>,
) -> AppResult<Json<nexo_db::models::chat::Chat>> {
    let mut member_ids = vec![auth.profile_id];
    for username in &input.members {
        let profile = ProfileRepo::find_by_username(&state.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound("Nome de usuário inválido!".into()))?;
        if !member_ids.contains(&profile.id) {
            member_ids.push(profile.id);
        }
    }

    let chat = ChatRepo::create(&state.pool, &member_ids).await?;
    Ok(Json(chat))
}

/// PATCH /api/chats/visualize-chat-messages/{chat_id}
///
/// Idempotent set-union: every message in the chat gains the caller's
/// read receipt; a second call adds nothing.
pub async fn visualize_chat_messages(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(chat_id): Path<DbId>,
) -> AppResult<Json<&'static str>> {
    require_chat_member(&state, chat_id, auth.profile_id).await?;

    ChatRepo::visualize_messages(&state.pool, chat_id, auth.profile_id).await?;
    Ok(Json("success"))
}

/// 404 for an unknown chat, 400 when the caller is not in it.
async fn require_chat_member(state: &AppState, chat_id: DbId, profile_id: DbId) -> AppResult<()> {
    ChatRepo::find_by_id(&state.pool, chat_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversa não encontrada!".into()))?;

    if !ChatRepo::is_member(&state.pool, chat_id, profile_id).await? {
        return Err(AppError::BadRequest("Você não está na conversa!".into()));
    }
    Ok(())
}
