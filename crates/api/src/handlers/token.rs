//! Handlers for the `/token` resource (login, refresh, logout).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use nexo_core::error::CoreError;
use nexo_db::models::session::CreateSession;
use nexo_db::models::user::UserInfo;
use nexo_db::repositories::{ProfileRepo, SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthProfile;
use crate::state::AppState;

/// Request body for `POST /token/`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// POST /token/
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let username = input.username.trim().to_lowercase();

    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Credenciais de login inválidas!".into(),
            ))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Conta desativada!".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Credenciais de login inválidas!".into(),
        )));
    }

    create_auth_response(&state, user.id, &user.username, &user.email).await.map(Json)
}

/// POST /token/refresh/
///
/// Exchange a valid refresh token for a new access + refresh pair.
/// The old session is revoked (token rotation).
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Token de atualização inválido ou expirado!".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Usuário não existe mais!".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Conta desativada!".into(),
        )));
    }

    create_auth_response(&state, user.id, &user.username, &user.email).await.map(Json)
}

/// POST /token/logout/
///
/// Revoke every session of the authenticated user.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthProfile,
) -> AppResult<Json<&'static str>> {
    SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    Ok(Json("success"))
}

/// Generate the token pair, persist a session row, build the response.
async fn create_auth_response(
    state: &AppState,
    user_id: nexo_core::types::DbId,
    username: &str,
    email: &str,
) -> AppResult<AuthResponse> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("user {user_id} has no profile")))?;

    let access_token = generate_access_token(user_id, profile.id, &profile.kind, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user_id,
            username: username.to_string(),
            email: email.to_string(),
        },
    })
}
