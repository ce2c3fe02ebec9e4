//! Handlers for project CRUD and the project directory.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use nexo_core::categories::ProjectCategory;
use nexo_core::error::CoreError;
use nexo_core::profile_kind::ProfileKind;
use nexo_core::roles::{ProjectRole, RequestKind};
use nexo_core::types::DbId;
use nexo_core::validation::{enforce_char_limits, normalize_name};
use nexo_db::models::market::Market;
use nexo_db::models::project::{
    CreateProject, Project, ProjectLink, ProjectMember, ProjectRequest, UpdateProject,
};
use nexo_db::repositories::{LinkRepo, MarketRepo, MemberRepo, ProjectRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthProfile;
use crate::query::{split_filter, ProjectListParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for project create/edit.
#[derive(Debug, Deserialize)]
pub struct ProjectInput {
    pub category: String,
    pub name: String,
    pub slogan: String,
    /// Market names; at least one must resolve.
    pub markets: Vec<String>,
}

/// Request body for `PUT /api/projects/edit-project-description/{id}`.
#[derive(Debug, Deserialize)]
pub struct DescriptionInput {
    pub description: String,
}

/// A category as `{value, readable}`, the shape the frontend renders.
#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub value: &'static str,
    pub readable: &'static str,
}

/// Full project shape returned by `get-project`.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub id: DbId,
    pub category: CategoryOut,
    pub name: String,
    pub slogan: String,
    pub description: String,
    pub image: String,
    pub members: Vec<ProjectMember>,
    pub pending_invitations: Vec<ProjectRequest>,
    pub markets: Vec<Market>,
    pub links: Vec<ProjectLink>,
    pub discussions_count: i64,
    pub stars_count: i64,
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// GET /api/projects/get-markets-name-list
pub async fn get_markets_name_list(State(state): State<AppState>) -> AppResult<Json<Vec<Market>>> {
    let markets = MarketRepo::list(&state.pool).await?;
    Ok(Json(markets))
}

/// GET /api/projects/get-projects-list
///
/// The newest 30 projects.
pub async fn get_projects_list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool, 30).await?;
    Ok(Json(projects))
}

/// GET /api/projects/get-filtered-projects-list?categories=&markets=
pub async fn get_filtered_projects_list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<Vec<Project>>> {
    let categories = split_filter(&params.categories);
    let market_names: Vec<String> = split_filter(&params.markets)
        .iter()
        .map(|m| normalize_name(m))
        .collect();

    let projects = ProjectRepo::list_filtered(&state.pool, &categories, &market_names).await?;
    Ok(Json(projects))
}

/// GET /api/projects/get-projects-categories-list
pub async fn get_projects_categories_list() -> Json<Vec<CategoryOut>> {
    let categories = ProjectCategory::ALL
        .into_iter()
        .map(|c| CategoryOut {
            value: c.value(),
            readable: c.readable(),
        })
        .collect();
    Json(categories)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/projects/create-project
///
/// Students only; the creator becomes the project's admin member.
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    ApiJson(input): ApiJson<ProjectInput>,
) -> AppResult<Json<&'static str>> {
    if auth.kind != ProfileKind::Student.as_str() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Somente universitários podem criar projetos!".into(),
        )));
    }

    let validated = validate_project_input(&state, &input).await?;
    ProjectRepo::create(&state.pool, &validated, auth.profile_id).await?;

    Ok(Json("success"))
}

/// GET /api/projects/get-project/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado!".into()))?;

    let category = ProjectCategory::parse(&project.category)
        .map_err(|_| AppError::InternalError(format!("bad category on project {project_id}")))?;

    let members = MemberRepo::list_for_project(&state.pool, project_id).await?;
    let pending_invitations =
        RequestRepo::list_for_project(&state.pool, project_id, RequestKind::Invitation).await?;
    let markets = MarketRepo::list_for_project(&state.pool, project_id).await?;
    let links = LinkRepo::list_for_project(&state.pool, project_id).await?;
    let discussions_count = ProjectRepo::discussion_count(&state.pool, project_id).await?;
    let stars_count = ProjectRepo::star_count(&state.pool, project_id).await?;

    Ok(Json(ProjectDetail {
        id: project.id,
        category: CategoryOut {
            value: category.value(),
            readable: category.readable(),
        },
        name: project.name,
        slogan: project.slogan,
        description: project.description,
        image: project.image,
        members,
        pending_invitations,
        markets,
        links,
        discussions_count,
        stars_count,
    }))
}

/// PUT /api/projects/edit-project/{id} -- admin only.
pub async fn edit_project(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> AppResult<Json<&'static str>> {
    require_project_admin(&state, project_id, auth.profile_id).await?;

    let validated = validate_project_input(&state, &input).await?;
    let update = UpdateProject {
        category: validated.category,
        name: validated.name,
        slogan: validated.slogan,
        market_ids: validated.market_ids,
    };
    ProjectRepo::update(&state.pool, project_id, &update).await?;

    Ok(Json("success"))
}

/// PUT /api/projects/edit-project-description/{id} -- admin only.
pub async fn edit_project_description(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(project_id): Path<DbId>,
    ApiJson(input): ApiJson<DescriptionInput>,
) -> AppResult<Json<&'static str>> {
    require_project_admin(&state, project_id, auth.profile_id).await?;

    let description = input.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::BadRequest(
            "A descrição não pode estar em branco!".into(),
        ));
    }
    enforce_char_limits(&[(&description, 20000)])?;

    ProjectRepo::update_description(&state.pool, project_id, &description).await?;
    Ok(Json("success"))
}

// ---------------------------------------------------------------------------
// Helpers shared with the membership/discussion handlers
// ---------------------------------------------------------------------------

/// 404 when the project does not exist.
pub async fn require_project(state: &AppState, project_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Projeto não encontrado!".into()))
}

/// 401 when the caller is not a member of the project.
pub async fn require_project_member(
    state: &AppState,
    project_id: DbId,
    profile_id: DbId,
) -> AppResult<ProjectRole> {
    let role = MemberRepo::role_of(&state.pool, project_id, profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Você não é membro do projeto!".into(),
            ))
        })?;
    Ok(ProjectRole::parse(&role)?)
}

/// 401 when the caller is not an admin member of the project.
pub async fn require_project_admin(
    state: &AppState,
    project_id: DbId,
    profile_id: DbId,
) -> AppResult<()> {
    require_project(state, project_id).await?;
    match require_project_member(state, project_id, profile_id).await? {
        ProjectRole::Admin => Ok(()),
        ProjectRole::Member => Err(AppError::Core(CoreError::Unauthorized(
            "Somente administradores podem fazer isso!".into(),
        ))),
    }
}

/// Shared validation for project create/edit.
async fn validate_project_input(
    state: &AppState,
    input: &ProjectInput,
) -> AppResult<CreateProject> {
    let name = input.name.trim().to_string();
    let slogan = input.slogan.trim().to_string();

    if name.is_empty() {
        return Err(AppError::BadRequest(
            "O nome do projeto não pode estar em branco!".into(),
        ));
    }
    if slogan.is_empty() {
        return Err(AppError::BadRequest(
            "O slogan do projeto não pode estar em branco!".into(),
        ));
    }
    enforce_char_limits(&[(&name, 50), (&slogan, 125)])?;

    let category = ProjectCategory::parse(&input.category)?;

    if input.markets.is_empty() {
        return Err(AppError::BadRequest("Selecione pelo menos um mercado!".into()));
    }
    let market_names: Vec<String> = input.markets.iter().map(|m| normalize_name(m)).collect();
    let market_ids = MarketRepo::ids_by_names(&state.pool, &market_names).await?;
    if market_ids.is_empty() {
        return Err(AppError::BadRequest("Selecione pelo menos um mercado!".into()));
    }

    Ok(CreateProject {
        category: category.value().to_string(),
        name,
        slogan,
        market_ids,
    })
}
