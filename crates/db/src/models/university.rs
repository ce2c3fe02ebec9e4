//! University and major lookup models.

use serde::Serialize;
use sqlx::FromRow;

use nexo_core::types::{DbId, Timestamp};

/// A university row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct University {
    pub id: DbId,
    pub name: String,
    pub cnpj: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Reduced shape for the name-list directory endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UniversityName {
    pub id: DbId,
    pub name: String,
}

/// A major (undergraduate course) row. Names are lowercased on save.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Major {
    pub id: DbId,
    pub name: String,
}
