//! Route definitions, one module per path prefix.
//!
//! ```text
//! POST  /token/                    login
//! POST  /token/refresh/            refresh
//! POST  /token/logout/             logout
//!
//! /api/profiles/...                signup, profile, directory, notifications
//! /api/projects/...                projects, membership, discussions, links
//! /api/chats/...                   chats and messages
//! /api/universities/...            university/major directory
//!
//! GET   /health                    liveness probe
//!
//! anything else                    404 "Rota não encontrada!"
//! ```

pub mod chat;
pub mod health;
pub mod profile;
pub mod project;
pub mod token;
pub mod university;

use axum::http::StatusCode;
use axum::Json;
use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profile::router())
        .nest("/projects", project::router())
        .nest("/chats", chat::router())
        .nest("/universities", university::router())
}

/// Catch-all for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<&'static str>) {
    (StatusCode::NOT_FOUND, Json("Rota não encontrada!"))
}
