//! Directory handlers for universities and majors.

use axum::extract::State;
use axum::Json;

use nexo_db::models::university::{Major, UniversityName};
use nexo_db::repositories::UniversityRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/universities/get-universities-name-list
pub async fn get_universities_name_list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UniversityName>>> {
    let universities = UniversityRepo::list_names(&state.pool).await?;
    Ok(Json(universities))
}

/// GET /api/universities/get-majors-name-list
pub async fn get_majors_name_list(State(state): State<AppState>) -> AppResult<Json<Vec<Major>>> {
    let majors = UniversityRepo::list_majors(&state.pool).await?;
    Ok(Json(majors))
}
