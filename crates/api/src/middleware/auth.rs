//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nexo_core::error::CoreError;
use nexo_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated profile extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires a
/// logged-in caller. Project-level roles are NOT carried here: every
/// handler that needs admin rights re-derives the membership row.
#[derive(Debug, Clone)]
pub struct AuthProfile {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The caller's profile id.
    pub profile_id: DbId,
    /// The profile kind (`"student"` or `"mentor"`).
    pub kind: String,
}

impl FromRequestParts<AppState> for AuthProfile {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("É necessário estar logado!".into()))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("É necessário estar logado!".into()))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("É necessário estar logado!".into()))
        })?;

        Ok(AuthProfile {
            user_id: claims.sub,
            profile_id: claims.profile_id,
            kind: claims.kind,
        })
    }
}
