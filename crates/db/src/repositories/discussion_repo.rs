//! Repository for discussions, their stars, and their replies.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::discussion::{CreateDiscussion, Discussion, DiscussionReply, DiscussionStar};

const DISCUSSION_COLUMNS: &str = "d.id, d.project_id, d.profile_id, d.title, d.body, d.category, u.username, d.created_at, d.updated_at";

const STAR_COLUMNS: &str = "s.id, s.discussion_id, s.profile_id, s.visualized, u.username, d.title AS discussion_title, s.created_at, s.updated_at";

const REPLY_COLUMNS: &str = "r.id, r.discussion_id, r.profile_id, r.content, r.visualized, u.username, d.title AS discussion_title, r.created_at, r.updated_at";

pub struct DiscussionRepo;

impl DiscussionRepo {
    pub async fn create(pool: &PgPool, input: &CreateDiscussion) -> Result<Discussion, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO discussions (project_id, profile_id, title, body, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.project_id)
        .bind(input.profile_id)
        .bind(&input.title)
        .bind(&input.body)
        .bind(&input.category)
        .fetch_one(pool)
        .await?;

        // The joined shape requires a second read; creation is rare.
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!(
            "SELECT {DISCUSSION_COLUMNS} FROM discussions d
             JOIN profiles p ON p.id = d.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE d.id = $1"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Discussion>, sqlx::Error> {
        let query = format!(
            "SELECT {DISCUSSION_COLUMNS} FROM discussions d
             JOIN profiles p ON p.id = d.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE d.project_id = $1
             ORDER BY d.id DESC"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM discussions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Stars ---

    /// Star a discussion. Returns `false` on a duplicate (constraint
    /// enforced, no pre-check).
    pub async fn add_star(
        pool: &PgPool,
        discussion_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO discussion_stars (discussion_id, profile_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_discussion_stars_discussion_profile DO NOTHING",
        )
        .bind(discussion_id)
        .bind(profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_star(
        pool: &PgPool,
        discussion_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM discussion_stars WHERE discussion_id = $1 AND profile_id = $2",
        )
        .bind(discussion_id)
        .bind(profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_stars(
        pool: &PgPool,
        discussion_id: DbId,
    ) -> Result<Vec<DiscussionStar>, sqlx::Error> {
        let query = format!(
            "SELECT {STAR_COLUMNS} FROM discussion_stars s
             JOIN discussions d ON d.id = s.discussion_id
             JOIN profiles p ON p.id = s.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE s.discussion_id = $1
             ORDER BY s.id DESC"
        );
        sqlx::query_as::<_, DiscussionStar>(&query)
            .bind(discussion_id)
            .fetch_all(pool)
            .await
    }

    /// Stars on the owner's discussions, authored by others, newest
    /// first. The notification layer applies the visibility window.
    pub async fn stars_on_owned_discussions(
        pool: &PgPool,
        owner_profile_id: DbId,
    ) -> Result<Vec<DiscussionStar>, sqlx::Error> {
        let query = format!(
            "SELECT {STAR_COLUMNS} FROM discussion_stars s
             JOIN discussions d ON d.id = s.discussion_id
             JOIN profiles p ON p.id = s.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE d.profile_id = $1 AND s.profile_id <> $1
             ORDER BY s.id DESC"
        );
        sqlx::query_as::<_, DiscussionStar>(&query)
            .bind(owner_profile_id)
            .fetch_all(pool)
            .await
    }

    /// Count of unvisualized stars on the owner's discussions by others.
    pub async fn unvisualized_star_count(
        pool: &PgPool,
        owner_profile_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM discussion_stars s
             JOIN discussions d ON d.id = s.discussion_id
             WHERE d.profile_id = $1 AND s.profile_id <> $1 AND s.visualized = FALSE",
        )
        .bind(owner_profile_id)
        .fetch_one(pool)
        .await
    }

    /// Flip every unvisualized star on the owner's discussions to
    /// visualized. `updated_at` records the flip for the grace window.
    pub async fn visualize_stars(pool: &PgPool, owner_profile_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE discussion_stars s SET visualized = TRUE, updated_at = NOW()
             FROM discussions d
             WHERE d.id = s.discussion_id AND d.profile_id = $1
               AND s.profile_id <> $1 AND s.visualized = FALSE",
        )
        .bind(owner_profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // --- Replies ---

    pub async fn add_reply(
        pool: &PgPool,
        discussion_id: DbId,
        profile_id: DbId,
        content: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO discussion_replies (discussion_id, profile_id, content)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(discussion_id)
        .bind(profile_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    pub async fn find_reply(pool: &PgPool, id: DbId) -> Result<Option<DiscussionReply>, sqlx::Error> {
        let query = format!(
            "SELECT {REPLY_COLUMNS} FROM discussion_replies r
             JOIN discussions d ON d.id = r.discussion_id
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, DiscussionReply>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_reply(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM discussion_replies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_replies(
        pool: &PgPool,
        discussion_id: DbId,
    ) -> Result<Vec<DiscussionReply>, sqlx::Error> {
        let query = format!(
            "SELECT {REPLY_COLUMNS} FROM discussion_replies r
             JOIN discussions d ON d.id = r.discussion_id
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE r.discussion_id = $1
             ORDER BY r.id"
        );
        sqlx::query_as::<_, DiscussionReply>(&query)
            .bind(discussion_id)
            .fetch_all(pool)
            .await
    }

    /// Replies on the owner's discussions, authored by others, newest first.
    pub async fn replies_on_owned_discussions(
        pool: &PgPool,
        owner_profile_id: DbId,
    ) -> Result<Vec<DiscussionReply>, sqlx::Error> {
        let query = format!(
            "SELECT {REPLY_COLUMNS} FROM discussion_replies r
             JOIN discussions d ON d.id = r.discussion_id
             JOIN profiles p ON p.id = r.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE d.profile_id = $1 AND r.profile_id <> $1
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, DiscussionReply>(&query)
            .bind(owner_profile_id)
            .fetch_all(pool)
            .await
    }

    pub async fn unvisualized_reply_count(
        pool: &PgPool,
        owner_profile_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM discussion_replies r
             JOIN discussions d ON d.id = r.discussion_id
             WHERE d.profile_id = $1 AND r.profile_id <> $1 AND r.visualized = FALSE",
        )
        .bind(owner_profile_id)
        .fetch_one(pool)
        .await
    }

    pub async fn visualize_replies(pool: &PgPool, owner_profile_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE discussion_replies r SET visualized = TRUE, updated_at = NOW()
             FROM discussions d
             WHERE d.id = r.discussion_id AND d.profile_id = $1
               AND r.profile_id <> $1 AND r.visualized = FALSE",
        )
        .bind(owner_profile_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
