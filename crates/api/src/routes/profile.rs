//! Route definitions for the `/api/profiles` resource.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{notification, profile};
use crate::state::AppState;

/// Routes mounted at `/api/profiles`.
///
/// ```text
/// POST  /{kind}/post-signup             create identity + profile + sub-record
/// PUT   /edit-my-profile                update own profile
/// GET   /get-my-profile                 own profile detail
/// GET   /get-profile/{username}         profile detail
/// GET   /get-profile-projects/{username}
/// GET   /get-mentor-markets/{username}
/// GET   /get-filtered-profiles/{query}  username substring search
/// GET   /get-profile-list               filtered directory listing
/// GET   /get-skills-name-list
/// GET   /get-notifications
/// GET   /get-notifications-number
/// PATCH /visualize-notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}/post-signup", post(profile::signup))
        .route("/edit-my-profile", put(profile::edit_my_profile))
        .route("/get-my-profile", get(profile::get_my_profile))
        .route("/get-profile/{username}", get(profile::get_profile))
        .route(
            "/get-profile-projects/{username}",
            get(profile::get_profile_projects),
        )
        .route(
            "/get-mentor-markets/{username}",
            get(profile::get_mentor_markets),
        )
        .route(
            "/get-filtered-profiles/{query}",
            get(profile::get_filtered_profiles),
        )
        .route("/get-profile-list", get(profile::get_profile_list))
        .route("/get-skills-name-list", get(profile::get_skills_name_list))
        .route("/get-notifications", get(notification::get_notifications))
        .route(
            "/get-notifications-number",
            get(notification::get_notifications_number),
        )
        .route(
            "/visualize-notifications",
            patch(notification::visualize_notifications),
        )
}
