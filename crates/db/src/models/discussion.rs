//! Discussion models: topics, stars, flat replies.

use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::{DbId, Timestamp};

/// A discussion row joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Discussion {
    pub id: DbId,
    pub project_id: DbId,
    pub profile_id: DbId,
    pub title: String,
    pub body: String,
    pub category: String,
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a discussion.
#[derive(Debug, Clone)]
pub struct CreateDiscussion {
    pub project_id: DbId,
    pub profile_id: DbId,
    pub title: String,
    pub body: String,
    pub category: String,
}

/// A star on a discussion. `visualized` only ever flips false -> true;
/// `updated_at` records when it did.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscussionStar {
    pub id: DbId,
    pub discussion_id: DbId,
    pub profile_id: DbId,
    pub visualized: bool,
    pub username: String,
    pub discussion_title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A flat, single-level reply to a discussion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscussionReply {
    pub id: DbId,
    pub discussion_id: DbId,
    pub profile_id: DbId,
    pub content: String,
    pub visualized: bool,
    pub username: String,
    pub discussion_title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
