//! Route definitions for the `/api/chats` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/api/chats`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-chats-list", get(chat::get_chats_list))
        .route("/get-chat-messages/{chat_id}", get(chat::get_chat_messages))
        .route("/create-message/{chat_id}", post(chat::create_message))
        .route("/create-chat", post(chat::create_chat))
        .route(
            "/visualize-chat-messages/{chat_id}",
            patch(chat::visualize_chat_messages),
        )
}
