//! Repository for the `universities` and `majors` lookup tables.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::university::{Major, University, UniversityName};

pub struct UniversityRepo;

impl UniversityRepo {
    pub async fn list_names(pool: &PgPool) -> Result<Vec<UniversityName>, sqlx::Error> {
        sqlx::query_as::<_, UniversityName>("SELECT id, name FROM universities ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<University>, sqlx::Error> {
        sqlx::query_as::<_, University>(
            "SELECT id, name, cnpj, created_at, updated_at FROM universities WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &PgPool, name: &str, cnpj: Option<&str>) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO universities (name, cnpj) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(cnpj)
            .fetch_one(pool)
            .await
    }

    pub async fn list_majors(pool: &PgPool) -> Result<Vec<Major>, sqlx::Error> {
        sqlx::query_as::<_, Major>("SELECT id, name FROM majors ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Majors are lowercased on save, mirroring the skill/market tables.
    pub async fn find_major_by_name(pool: &PgPool, name: &str) -> Result<Option<Major>, sqlx::Error> {
        sqlx::query_as::<_, Major>("SELECT id, name FROM majors WHERE name = LOWER($1)")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn create_major(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO majors (name) VALUES (LOWER($1)) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
