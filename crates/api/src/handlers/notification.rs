//! Notification aggregation: what does this profile need to see.
//!
//! Four sources feed the response: incoming invitations, entry requests
//! on projects the caller administers, and stars/replies on the caller's
//! own discussions. Stars and replies use the visibility window from
//! `nexo_core::notifications`; the badge count deliberately does not.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use nexo_core::notifications::in_notification_feed;
use nexo_core::roles::ProjectRole;
use nexo_db::models::discussion::{DiscussionReply, DiscussionStar};
use nexo_db::models::project::ProjectRequest;
use nexo_db::repositories::{DiscussionRepo, RequestRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthProfile;
use crate::state::AppState;

/// Response of `GET /api/profiles/get-notifications`.
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub projects_invitations: Vec<ProjectRequest>,
    pub projects_entry_requests: Vec<ProjectRequest>,
    pub discussions_stars: Vec<DiscussionStar>,
    pub discussions_replies: Vec<DiscussionReply>,
}

/// GET /api/profiles/get-notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    auth: AuthProfile,
) -> AppResult<Json<NotificationsResponse>> {
    let now = Utc::now();

    let projects_invitations =
        RequestRepo::list_invitations_for_profile(&state.pool, auth.profile_id).await?;

    // Entry requests are fetched by membership, then rows where the
    // caller is not an admin of the project are discarded.
    let projects_entry_requests: Vec<ProjectRequest> =
        RequestRepo::list_entry_requests_for_member(&state.pool, auth.profile_id)
            .await?
            .into_iter()
            .filter(|row| row.viewer_role == ProjectRole::Admin.as_str())
            .map(|row| row.into_request())
            .collect();

    let discussions_stars: Vec<DiscussionStar> =
        DiscussionRepo::stars_on_owned_discussions(&state.pool, auth.profile_id)
            .await?
            .into_iter()
            .filter(|star| in_notification_feed(star.visualized, star.updated_at, now))
            .collect();

    let discussions_replies: Vec<DiscussionReply> =
        DiscussionRepo::replies_on_owned_discussions(&state.pool, auth.profile_id)
            .await?
            .into_iter()
            .filter(|reply| in_notification_feed(reply.visualized, reply.updated_at, now))
            .collect();

    Ok(Json(NotificationsResponse {
        projects_invitations,
        projects_entry_requests,
        discussions_stars,
        discussions_replies,
    }))
}

/// GET /api/profiles/get-notifications-number
///
/// The badge count: invitations and admin entry requests count fully,
/// stars/replies count only while unvisualized. The feed's grace window
/// never widens this number.
pub async fn get_notifications_number(
    State(state): State<AppState>,
    auth: AuthProfile,
) -> AppResult<Json<i64>> {
    let invitations =
        RequestRepo::list_invitations_for_profile(&state.pool, auth.profile_id).await?;

    let entry_requests = RequestRepo::list_entry_requests_for_member(&state.pool, auth.profile_id)
        .await?
        .into_iter()
        .filter(|row| row.viewer_role == ProjectRole::Admin.as_str())
        .count() as i64;

    let stars = DiscussionRepo::unvisualized_star_count(&state.pool, auth.profile_id).await?;
    let replies = DiscussionRepo::unvisualized_reply_count(&state.pool, auth.profile_id).await?;

    Ok(Json(invitations.len() as i64 + entry_requests + stars + replies))
}

/// PATCH /api/profiles/visualize-notifications
///
/// Flip every unvisualized star/reply on the caller's discussions to
/// visualized. Idempotent; invitations and entry requests are untouched
/// (they disappear by being replied to).
pub async fn visualize_notifications(
    State(state): State<AppState>,
    auth: AuthProfile,
) -> AppResult<Json<&'static str>> {
    DiscussionRepo::visualize_stars(&state.pool, auth.profile_id).await?;
    DiscussionRepo::visualize_replies(&state.pool, auth.profile_id).await?;
    Ok(Json("success"))
}
