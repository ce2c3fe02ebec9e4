//! Route definitions for the `/api/universities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::university;
use crate::state::AppState;

/// Routes mounted at `/api/universities`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/get-universities-name-list",
            get(university::get_universities_name_list),
        )
        .route("/get-majors-name-list", get(university::get_majors_name_list))
}
