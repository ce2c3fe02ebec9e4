//! Route definitions for the `/api/projects` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{discussion, link, membership, project};
use crate::state::AppState;

/// Routes mounted at `/api/projects`.
///
/// ```text
/// GET    /get-markets-name-list
/// GET    /get-projects-list
/// GET    /get-filtered-projects-list
/// GET    /get-projects-categories-list
/// POST   /create-project
/// GET    /get-project/{id}
/// PUT    /edit-project/{id}
/// PUT    /edit-project-description/{id}
///
/// POST   /invite-users-to-project/{id}
/// POST   /uninvite-users-from-project/{id}
/// POST   /ask-to-join-project/{id}
/// POST   /remove-users-from-project/{id}
/// POST   /reply-project-invitation
/// POST   /reply-project-entering-request
/// POST   /leave-project/{id}
/// POST   /star-project/{id}
/// POST   /unstar-project/{id}
///
/// POST   /create-link/{project_id}
/// DELETE /delete-link/{link_id}
///
/// POST   /create-project-discussion/{project_id}
/// GET    /get-project-discussions/{project_id}
/// GET    /get-project-discussion/{discussion_id}
/// DELETE /delete-project-discussion
/// POST   /star-discussion/{discussion_id}
/// POST   /unstar-discussion/{discussion_id}
/// POST   /reply-discussion/{discussion_id}
/// DELETE /delete-discussion-reply/{reply_id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-markets-name-list", get(project::get_markets_name_list))
        .route("/get-projects-list", get(project::get_projects_list))
        .route(
            "/get-filtered-projects-list",
            get(project::get_filtered_projects_list),
        )
        .route(
            "/get-projects-categories-list",
            get(project::get_projects_categories_list),
        )
        .route("/create-project", post(project::create_project))
        .route("/get-project/{id}", get(project::get_project))
        .route("/edit-project/{id}", put(project::edit_project))
        .route(
            "/edit-project-description/{id}",
            put(project::edit_project_description),
        )
        .route(
            "/invite-users-to-project/{id}",
            post(membership::invite_users_to_project),
        )
        .route(
            "/uninvite-users-from-project/{id}",
            post(membership::uninvite_users_from_project),
        )
        .route(
            "/ask-to-join-project/{id}",
            post(membership::ask_to_join_project),
        )
        .route(
            "/remove-users-from-project/{id}",
            post(membership::remove_users_from_project),
        )
        .route(
            "/reply-project-invitation",
            post(membership::reply_project_invitation),
        )
        .route(
            "/reply-project-entering-request",
            post(membership::reply_project_entering_request),
        )
        .route("/leave-project/{id}", post(membership::leave_project))
        .route("/star-project/{id}", post(membership::star_project))
        .route("/unstar-project/{id}", post(membership::unstar_project))
        .route("/create-link/{project_id}", post(link::create_link))
        .route("/delete-link/{link_id}", delete(link::delete_link))
        .route(
            "/create-project-discussion/{project_id}",
            post(discussion::create_project_discussion),
        )
        .route(
            "/get-project-discussions/{project_id}",
            get(discussion::get_project_discussions),
        )
        .route(
            "/get-project-discussion/{discussion_id}",
            get(discussion::get_project_discussion),
        )
        .route(
            "/delete-project-discussion",
            delete(discussion::delete_project_discussion),
        )
        .route(
            "/star-discussion/{discussion_id}",
            post(discussion::star_discussion),
        )
        .route(
            "/unstar-discussion/{discussion_id}",
            post(discussion::unstar_discussion),
        )
        .route(
            "/reply-discussion/{discussion_id}",
            post(discussion::reply_discussion),
        )
        .route(
            "/delete-discussion-reply/{reply_id}",
            delete(discussion::delete_discussion_reply),
        )
}
