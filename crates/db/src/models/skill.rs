//! Skill lookup model. Names are lowercased on save and unique.

use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::DbId;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
}
