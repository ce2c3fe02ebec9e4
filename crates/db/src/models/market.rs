//! Market (field of activity) lookup model. Names are lowercased and unique.

use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::DbId;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Market {
    pub id: DbId,
    pub name: String,
}
