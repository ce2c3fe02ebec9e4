//! Repository for the `skills` lookup table.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::skill::Skill;

pub struct SkillRepo;

impl SkillRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        sqlx::query_as::<_, Skill>("SELECT id, name FROM skills ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Resolve a set of (already lowercased) names to ids. Unknown names
    /// are silently dropped; the caller decides whether an empty result
    /// is an error.
    pub async fn ids_by_names(pool: &PgPool, names: &[String]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM skills WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(pool)
            .await
    }

    /// Insert a skill, lowercasing the name. Returns the existing row's
    /// id when the name is already present.
    pub async fn upsert(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO skills (name) VALUES (LOWER($1))
             ON CONFLICT ON CONSTRAINT uq_skills_name DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
