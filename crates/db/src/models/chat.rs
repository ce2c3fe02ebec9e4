//! Chat and message models.

use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::{DbId, Timestamp};

/// A chat row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub id: DbId,
    pub created_at: Timestamp,
}

/// A chat id paired with the caller's unread count and last activity,
/// as produced by the chat-list query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatListEntry {
    pub id: DbId,
    pub last_message_at: Timestamp,
    pub unvisualized_count: i64,
}

/// A message row joined with its sender's username (None when the
/// sender's profile was deleted).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub chat_id: DbId,
    pub sender_id: Option<DbId>,
    pub sender_username: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
}
