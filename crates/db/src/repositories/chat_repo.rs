//! Repository for chats, messages, and read receipts.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::chat::{Chat, ChatListEntry, Message};

const MESSAGE_COLUMNS: &str = "m.id, m.chat_id, m.sender_id, u.username AS sender_username, m.content, m.created_at";

pub struct ChatRepo;

impl ChatRepo {
    /// Create a chat with its initial member set in one transaction.
    pub async fn create(pool: &PgPool, member_profile_ids: &[DbId]) -> Result<Chat, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let chat = sqlx::query_as::<_, Chat>(
            "INSERT INTO chats DEFAULT VALUES RETURNING id, created_at",
        )
        .fetch_one(&mut *tx)
        .await?;

        for profile_id in member_profile_ids {
            sqlx::query(
                "INSERT INTO chat_members (chat_id, profile_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(chat.id)
            .bind(profile_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(chat)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chat>, sqlx::Error> {
        sqlx::query_as::<_, Chat>("SELECT id, created_at FROM chats WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn is_member(pool: &PgPool, chat_id: DbId, profile_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM chat_members WHERE chat_id = $1 AND profile_id = $2)",
        )
        .bind(chat_id)
        .bind(profile_id)
        .fetch_one(pool)
        .await
    }

    pub async fn member_usernames(pool: &PgPool, chat_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.username FROM chat_members cm
             JOIN profiles p ON p.id = cm.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE cm.chat_id = $1
             ORDER BY u.username",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    /// The caller's chats that have at least one message, ordered by the
    /// latest message, each with the count of messages lacking the
    /// caller's read receipt.
    pub async fn list_for_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<ChatListEntry>, sqlx::Error> {
        sqlx::query_as::<_, ChatListEntry>(
            "SELECT c.id,
                    MAX(m.created_at) AS last_message_at,
                    COUNT(*) FILTER (WHERE NOT EXISTS (
                        SELECT 1 FROM message_visualizations mv
                        WHERE mv.message_id = m.id AND mv.profile_id = $1
                    )) AS unvisualized_count
             FROM chats c
             JOIN chat_members cm ON cm.chat_id = c.id AND cm.profile_id = $1
             JOIN messages m ON m.chat_id = c.id
             GROUP BY c.id
             ORDER BY last_message_at DESC, c.id DESC",
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await
    }

    /// One page of a chat's history, newest first.
    pub async fn messages_page(
        pool: &PgPool,
        chat_id: DbId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m
             LEFT JOIN profiles p ON p.id = m.sender_id
             LEFT JOIN users u ON u.id = p.user_id
             WHERE m.chat_id = $1
             ORDER BY m.created_at DESC, m.id DESC
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(chat_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Insert a message plus the sender's own read receipt, so unread
    /// counts never include the sender's messages.
    pub async fn create_message(
        pool: &PgPool,
        chat_id: DbId,
        sender_profile_id: DbId,
        content: &str,
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let message_id: DbId = sqlx::query_scalar(
            "INSERT INTO messages (chat_id, sender_id, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(chat_id)
        .bind(sender_profile_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO message_visualizations (message_id, profile_id) VALUES ($1, $2)")
            .bind(message_id)
            .bind(sender_profile_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message_id)
    }

    /// Idempotent set-union: give the profile a receipt on every message
    /// in the chat that lacks one. Returns the number added.
    pub async fn visualize_messages(
        pool: &PgPool,
        chat_id: DbId,
        profile_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO message_visualizations (message_id, profile_id)
             SELECT m.id, $2 FROM messages m WHERE m.chat_id = $1
             ON CONFLICT DO NOTHING",
        )
        .bind(chat_id)
        .bind(profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Messages in the chat without the profile's receipt.
    pub async fn unvisualized_count(
        pool: &PgPool,
        chat_id: DbId,
        profile_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages m
             WHERE m.chat_id = $1 AND NOT EXISTS (
                 SELECT 1 FROM message_visualizations mv
                 WHERE mv.message_id = m.id AND mv.profile_id = $2)",
        )
        .bind(chat_id)
        .bind(profile_id)
        .fetch_one(pool)
        .await
    }
}
