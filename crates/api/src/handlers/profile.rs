//! Handlers for the `/api/profiles` resource: signup, profile editing,
//! and the profile directory.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use nexo_core::profile_kind::ProfileKind;
use nexo_core::types::DbId;
use nexo_core::validation::{
    enforce_char_limits, normalize_name, normalize_username, require_filled, validate_birth_date,
    validate_password,
};
use nexo_db::models::profile::{CreateSignup, ProfileListFilter, ProfileWithUsername, UpdateProfile};
use nexo_db::models::project::Project;
use nexo_db::repositories::{
    MarketRepo, ProfileRepo, ProjectRepo, SkillRepo, UniversityRepo, UserRepo,
};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthProfile;
use crate::query::{split_filter, ProfileListParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/profiles/{kind}/post-signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Password confirmation.
    pub passwordc: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO-8601 date string.
    pub birth_date: String,
    pub skills_names: Vec<String>,
    /// Student-only affiliation.
    pub university_name: Option<String>,
    pub major_name: Option<String>,
}

/// Request body for `PUT /api/profiles/edit-my-profile`.
#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub linkedin: Option<String>,
    /// New photo reference; `None` keeps the current one.
    pub photo: Option<String>,
    pub skills_names: Vec<String>,
    pub university_name: Option<String>,
    pub major_name: Option<String>,
}

/// Full profile shape returned by the profile detail endpoints.
#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    pub id: DbId,
    pub username: String,
    pub kind: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub linkedin: String,
    pub photo: String,
    pub birth_date: Option<NaiveDate>,
    pub skills: Vec<String>,
    pub university: Option<String>,
    pub major: Option<String>,
}

/// Response of the paged directory listing.
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    /// Whether the page contains every matching profile.
    pub isall: bool,
    pub profiles: Vec<ProfileWithUsername>,
}

// ---------------------------------------------------------------------------
// Signup / edit
// ---------------------------------------------------------------------------

/// POST /api/profiles/{kind}/post-signup
///
/// Validates in sequence, then creates user + profile + kind sub-record
/// + skill links in one transaction.
pub async fn signup(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    ApiJson(input): ApiJson<SignupRequest>,
) -> AppResult<Json<&'static str>> {
    let kind = ProfileKind::parse(&kind)?;

    let username = normalize_username(&input.username);
    let email = input.email.trim().to_string();
    let password = input.password.trim().to_string();
    let passwordc = input.passwordc.trim().to_string();
    let first_name = input.first_name.trim().to_string();
    let last_name = input.last_name.trim().to_string();

    require_filled(&[
        &username,
        &email,
        &password,
        &passwordc,
        &first_name,
        &last_name,
        &input.birth_date,
    ])?;
    enforce_char_limits(&[
        (&username, 25),
        (&email, 50),
        (&password, 50),
        (&first_name, 30),
        (&last_name, 30),
    ])?;
    validate_password(&password, &passwordc)?;

    if UserRepo::username_taken(&state.pool, &username).await? {
        return Err(AppError::BadRequest("Nome de usuário já utilizado!".into()));
    }
    if UserRepo::email_taken(&state.pool, &email).await? {
        return Err(AppError::BadRequest("Email já utilizado!".into()));
    }

    let skill_ids = resolve_skills(&state, &input.skills_names).await?;
    let birth_date = validate_birth_date(&input.birth_date)?;

    let (university_id, major_id) = match kind {
        ProfileKind::Student => {
            resolve_affiliation(&state, input.university_name.as_deref(), input.major_name.as_deref())
                .await?
        }
        ProfileKind::Mentor => (None, None),
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let signup = CreateSignup {
        username,
        email,
        password_hash,
        kind: kind.as_str().to_string(),
        first_name,
        last_name,
        birth_date,
        skill_ids,
        university_id,
        major_id,
    };
    ProfileRepo::create_signup(&state.pool, &signup).await?;

    Ok(Json("success"))
}

/// PUT /api/profiles/edit-my-profile
pub async fn edit_my_profile(
    State(state): State<AppState>,
    auth: AuthProfile,
    ApiJson(input): ApiJson<EditProfileRequest>,
) -> AppResult<Json<&'static str>> {
    let username = normalize_username(&input.username);
    let first_name = input.first_name.trim().to_string();
    let last_name = input.last_name.trim().to_string();
    let bio = input.bio.trim().to_string();

    if username.is_empty() || first_name.is_empty() || last_name.is_empty() || bio.is_empty() {
        return Err(AppError::BadRequest(
            "Os campos nome de usuário, nome, sobrenome e bio são obrigatórios!".into(),
        ));
    }
    enforce_char_limits(&[
        (&username, 25),
        (&first_name, 30),
        (&last_name, 30),
        (&bio, 150),
    ])?;

    if UserRepo::username_taken_by_other(&state.pool, &username, auth.user_id).await? {
        return Err(AppError::BadRequest("Nome de usuário já utilizado!".into()));
    }

    let skill_ids = resolve_skills(&state, &input.skills_names).await?;

    let (university_id, major_id) = if auth.kind == ProfileKind::Student.as_str()
        && (input.university_name.is_some() || input.major_name.is_some())
    {
        resolve_affiliation(&state, input.university_name.as_deref(), input.major_name.as_deref())
            .await?
    } else {
        (None, None)
    };

    let update = UpdateProfile {
        username,
        first_name,
        last_name,
        bio,
        linkedin: input.linkedin.map(|l| l.trim().to_string()),
        photo: input.photo,
        skill_ids,
        university_id,
        major_id,
    };
    ProfileRepo::update(&state.pool, auth.profile_id, &update).await?;

    Ok(Json("success"))
}

// ---------------------------------------------------------------------------
// Detail / directory
// ---------------------------------------------------------------------------

/// GET /api/profiles/get-my-profile
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthProfile,
) -> AppResult<Json<ProfileDetail>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".into()))?;
    let user = UserRepo::find_by_id(&state.pool, profile.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".into()))?;

    let detail = build_detail(
        &state,
        ProfileWithUsername {
            id: profile.id,
            username: user.username,
            kind: profile.kind,
            first_name: profile.first_name,
            last_name: profile.last_name,
            bio: profile.bio,
            linkedin: profile.linkedin,
            photo: profile.photo,
            birth_date: profile.birth_date,
        },
    )
    .await?;
    Ok(Json(detail))
}

/// GET /api/profiles/get-profile/{username}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<ProfileDetail>> {
    let profile = ProfileRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".into()))?;
    let detail = build_detail(&state, profile).await?;
    Ok(Json(detail))
}

/// GET /api/profiles/get-profile-projects/{username}
pub async fn get_profile_projects(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<Project>>> {
    let profile = ProfileRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".into()))?;
    let projects = ProjectRepo::list_for_profile(&state.pool, profile.id).await?;
    Ok(Json(projects))
}

/// GET /api/profiles/get-mentor-markets/{username}
pub async fn get_mentor_markets(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<nexo_db::models::market::Market>>> {
    let profile = ProfileRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".into()))?;
    if profile.kind != ProfileKind::Mentor.as_str() {
        return Err(AppError::BadRequest("O usuário não é um mentor!".into()));
    }
    let markets = MarketRepo::list_for_mentor_username(&state.pool, &username).await?;
    Ok(Json(markets))
}

/// GET /api/profiles/get-filtered-profiles/{query}
///
/// Username substring search, first 15 matches.
pub async fn get_filtered_profiles(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<ProfileWithUsername>>> {
    let profiles = ProfileRepo::search_by_username(&state.pool, &query, 15).await?;
    Ok(Json(profiles))
}

/// GET /api/profiles/get-profile-list
pub async fn get_profile_list(
    State(state): State<AppState>,
    Query(params): Query<ProfileListParams>,
) -> AppResult<Json<ProfileListResponse>> {
    let filter = ProfileListFilter {
        kind: params.kind,
        university_names: params.universities.as_deref().map(split_filter),
        major_names: params.majors.as_deref().map(split_filter),
        skill_names: params.skills.as_deref().map(split_filter),
    };
    let length = params.length.clamp(1, 100);

    let (profiles, total) = ProfileRepo::filter_list(&state.pool, &filter, length).await?;
    let isall = profiles.len() as i64 == total;

    Ok(Json(ProfileListResponse { isall, profiles }))
}

/// GET /api/profiles/get-skills-name-list
pub async fn get_skills_name_list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<nexo_db::models::skill::Skill>>> {
    let skills = SkillRepo::list(&state.pool).await?;
    Ok(Json(skills))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve skill names to ids; at least one must exist.
async fn resolve_skills(state: &AppState, names: &[String]) -> AppResult<Vec<DbId>> {
    let normalized: Vec<String> = names.iter().map(|n| normalize_name(n)).collect();
    let ids = SkillRepo::ids_by_names(&state.pool, &normalized).await?;
    if ids.is_empty() {
        return Err(AppError::BadRequest(
            "Selecione pelo menos uma habilidade válida!".into(),
        ));
    }
    Ok(ids)
}

/// Resolve university and major names for a student, each by exact name.
async fn resolve_affiliation(
    state: &AppState,
    university_name: Option<&str>,
    major_name: Option<&str>,
) -> AppResult<(Option<DbId>, Option<DbId>)> {
    let university_id = match university_name {
        Some(name) => Some(
            UniversityRepo::find_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| AppError::BadRequest("Universidade inválida!".into()))?
                .id,
        ),
        None => None,
    };
    let major_id = match major_name {
        Some(name) => Some(
            UniversityRepo::find_major_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| AppError::BadRequest("Curso inválido!".into()))?
                .id,
        ),
        None => None,
    };
    Ok((university_id, major_id))
}

async fn build_detail(
    state: &AppState,
    profile: ProfileWithUsername,
) -> AppResult<ProfileDetail> {
    let skills = ProfileRepo::skill_names(&state.pool, profile.id).await?;
    let (university, major) = match ProfileRepo::student_affiliation(&state.pool, profile.id).await? {
        Some((university, major)) => (university, major),
        None => (None, None),
    };

    Ok(ProfileDetail {
        id: profile.id,
        username: profile.username,
        kind: profile.kind,
        first_name: profile.first_name,
        last_name: profile.last_name,
        bio: profile.bio,
        linkedin: profile.linkedin,
        photo: profile.photo,
        birth_date: profile.birth_date,
        skills,
        university,
        major,
    })
}
