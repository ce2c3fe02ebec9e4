//! Route definitions for the `/token` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::token;
use crate::state::AppState;

/// Routes for the `/token/` endpoints.
///
/// These use full paths and are `merge`d at the router root (rather than
/// `nest`ed) so the login endpoint resolves at `/token/` with its trailing
/// slash: under axum 0.8 a `/` route nested at `/token` answers `/token`
/// (no slash), not `/token/`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token/", post(token::login))
        .route("/token/refresh/", post(token::refresh))
        .route("/token/logout/", post(token::logout))
}
